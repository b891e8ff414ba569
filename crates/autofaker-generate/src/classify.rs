use std::collections::BTreeSet;
use std::fmt;

use autofaker_core::{PrimitiveKind, TypeKind, TypeRef};

use crate::config::GenerationConfig;
use crate::generators::GeneratorFamily;

/// Why a type produces no value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UngenerableReason {
    UnknownType,
    Interface,
    Abstract,
    EmptyEnum,
    NoGenerator,
}

impl UngenerableReason {
    pub fn as_str(self) -> &'static str {
        match self {
            UngenerableReason::UnknownType => "unknown type",
            UngenerableReason::Interface => "interface without implementation",
            UngenerableReason::Abstract => "abstract type without implementation",
            UngenerableReason::EmptyEnum => "enum without variants",
            UngenerableReason::NoGenerator => "no generator registered",
        }
    }
}

impl fmt::Display for UngenerableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the engine handles a type reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeClass {
    Primitive(PrimitiveKind),
    /// An exact generator registered for a non-primitive type.
    Custom,
    Enum,
    Array,
    Collection,
    Dictionary,
    Nullable,
    Composite,
    Ungenerable(UngenerableReason),
}

impl TypeClass {
    pub fn is_generable(self) -> bool {
        !matches!(self, TypeClass::Ungenerable(_))
    }
}

/// Classify `ty` against the configured registry and catalog.
///
/// Exact generators win over families, families over composite handling.
pub fn classify(ty: &TypeRef, config: &GenerationConfig) -> TypeClass {
    let catalog = config.catalog();
    let registry = config.registry();

    if registry.exact(ty).is_some() {
        return match ty {
            TypeRef::Primitive(kind) => TypeClass::Primitive(*kind),
            _ => TypeClass::Custom,
        };
    }

    if let Some(family) = registry.family(ty, catalog) {
        if registry.resolve(ty, catalog).is_none() {
            return TypeClass::Ungenerable(UngenerableReason::NoGenerator);
        }
        return match family {
            GeneratorFamily::Dictionary => TypeClass::Dictionary,
            GeneratorFamily::Set | GeneratorFamily::List => TypeClass::Collection,
            GeneratorFamily::Array => TypeClass::Array,
            GeneratorFamily::Nullable => TypeClass::Nullable,
            GeneratorFamily::Enum => {
                let empty = ty
                    .as_named()
                    .and_then(|name| catalog.descriptor(name))
                    .and_then(|descriptor| descriptor.enum_variants())
                    .is_none_or(|variants| variants.is_empty());
                if empty {
                    TypeClass::Ungenerable(UngenerableReason::EmptyEnum)
                } else {
                    TypeClass::Enum
                }
            }
        };
    }

    let TypeRef::Named(name) = ty else {
        return TypeClass::Ungenerable(UngenerableReason::NoGenerator);
    };
    let Some(descriptor) = catalog.descriptor(name) else {
        return TypeClass::Ungenerable(UngenerableReason::UnknownType);
    };
    match &descriptor.kind {
        TypeKind::Composite => TypeClass::Composite,
        TypeKind::Abstract | TypeKind::Interface if config.instantiator(name).is_some() => {
            TypeClass::Composite
        }
        TypeKind::Abstract => TypeClass::Ungenerable(UngenerableReason::Abstract),
        TypeKind::Interface => TypeClass::Ungenerable(UngenerableReason::Interface),
        TypeKind::Enum(_) => TypeClass::Ungenerable(UngenerableReason::NoGenerator),
    }
}

/// Whether `ty` can produce a value at all, ignoring depth limits.
///
/// Composites need an instantiator or at least one constructor whose
/// parameters are all generable. A composite already under inspection counts
/// as generable so cyclic parameter graphs terminate.
pub fn is_generable(ty: &TypeRef, config: &GenerationConfig) -> bool {
    let mut visiting = BTreeSet::new();
    generable(ty, config, &mut visiting)
}

fn generable<'t>(
    ty: &'t TypeRef,
    config: &'t GenerationConfig,
    visiting: &mut BTreeSet<&'t str>,
) -> bool {
    match classify(ty, config) {
        TypeClass::Ungenerable(_) => false,
        TypeClass::Composite => {
            let Some(name) = ty.as_named() else {
                return false;
            };
            if config.instantiator(name).is_some() || !visiting.insert(name) {
                return true;
            }
            let result = config.catalog().constructors(name).is_ok_and(|constructors| {
                constructors.iter().any(|constructor| {
                    constructor
                        .params
                        .iter()
                        .all(|param| generable(&param.ty, config, visiting))
                })
            });
            visiting.remove(name);
            result
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use autofaker_core::{ConstructorDescriptor, ParamDescriptor, TypeCatalog, TypeDescriptor};

    use super::*;
    use crate::binder::ConstructionOverride;
    use crate::config::ConfigBuilder;

    fn catalog() -> TypeCatalog {
        TypeCatalog::from_descriptors([
            TypeDescriptor::composite("Order").member("code", TypeRef::string()),
            TypeDescriptor::interface("IShape"),
            TypeDescriptor::abstract_type("Animal"),
            TypeDescriptor::enumeration("Status", ["Open", "Closed"]),
            TypeDescriptor::enumeration("Empty", Vec::<String>::new()),
            TypeDescriptor::composite("NeedsShape").constructor(ConstructorDescriptor::new(vec![
                ParamDescriptor::new("shape", TypeRef::named("IShape")),
            ])),
            TypeDescriptor::composite("Node").constructor(ConstructorDescriptor::new(vec![
                ParamDescriptor::new("parent", TypeRef::named("Node")),
            ])),
        ])
        .expect("valid catalog")
    }

    #[test]
    fn classifies_each_kind() {
        let config = ConfigBuilder::new(catalog()).build().expect("config");
        assert_eq!(
            classify(&TypeRef::string(), &config),
            TypeClass::Primitive(PrimitiveKind::String)
        );
        assert_eq!(classify(&TypeRef::named("Order"), &config), TypeClass::Composite);
        assert_eq!(classify(&TypeRef::named("Status"), &config), TypeClass::Enum);
        assert_eq!(
            classify(&TypeRef::map(TypeRef::string(), TypeRef::named("Order")), &config),
            TypeClass::Dictionary
        );
        assert_eq!(
            classify(&TypeRef::set(TypeRef::string()), &config),
            TypeClass::Collection
        );
        assert_eq!(
            classify(&TypeRef::array(TypeRef::string()), &config),
            TypeClass::Array
        );
        assert_eq!(
            classify(&TypeRef::nullable(TypeRef::named("Order")), &config),
            TypeClass::Nullable
        );
        assert_eq!(
            classify(&TypeRef::named("IShape"), &config),
            TypeClass::Ungenerable(UngenerableReason::Interface)
        );
        assert_eq!(
            classify(&TypeRef::named("Animal"), &config),
            TypeClass::Ungenerable(UngenerableReason::Abstract)
        );
        assert_eq!(
            classify(&TypeRef::named("Empty"), &config),
            TypeClass::Ungenerable(UngenerableReason::EmptyEnum)
        );
        assert_eq!(
            classify(&TypeRef::named("Missing"), &config),
            TypeClass::Ungenerable(UngenerableReason::UnknownType)
        );
    }

    #[test]
    fn instantiator_makes_interface_composite() {
        let config = ConfigBuilder::new(catalog())
            .with_instantiator(
                "IShape",
                ConstructionOverride::new(|_| Ok(autofaker_core::Instance::new("IShape"))),
            )
            .build()
            .expect("config");
        assert_eq!(classify(&TypeRef::named("IShape"), &config), TypeClass::Composite);
        assert!(is_generable(&TypeRef::named("NeedsShape"), &config));
    }

    #[test]
    fn generability_follows_constructor_parameters() {
        let config = ConfigBuilder::new(catalog()).build().expect("config");
        assert!(!is_generable(&TypeRef::named("NeedsShape"), &config));
        assert!(is_generable(&TypeRef::named("Node"), &config));
        assert!(is_generable(&TypeRef::list(TypeRef::named("IShape")), &config));
    }
}
