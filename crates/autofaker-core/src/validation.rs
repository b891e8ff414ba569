use std::collections::BTreeSet;

use crate::catalog::{TypeCatalog, TypeIntrospector};
use crate::descriptor::TypeKind;
use crate::error::{Error, Result};

/// Validate internal consistency of a type catalog.
///
/// This checks:
/// - named references in members and constructor params resolve
/// - base types exist, are not enums, and inheritance is acyclic
/// - member names are unique across an inheritance chain
/// - constructor parameter names are unique per constructor
/// - enums declare no members, base or constructors
pub fn validate_catalog(catalog: &TypeCatalog) -> Result<()> {
    for descriptor in catalog.iter() {
        for ty in descriptor.referenced_types() {
            for name in ty.named_refs() {
                if catalog.descriptor(name).is_none() {
                    return Err(Error::InvalidCatalog(format!(
                        "{} references unknown type {}",
                        descriptor.name, name
                    )));
                }
            }
        }

        if let TypeKind::Enum(_) = descriptor.kind {
            if !descriptor.members.is_empty()
                || descriptor.base.is_some()
                || !descriptor.constructors.is_empty()
            {
                return Err(Error::InvalidCatalog(format!(
                    "enum {} cannot declare members, base or constructors",
                    descriptor.name
                )));
            }
            continue;
        }

        if let Some(base) = &descriptor.base {
            match catalog.descriptor(base) {
                None => {
                    return Err(Error::InvalidCatalog(format!(
                        "{} extends unknown type {}",
                        descriptor.name, base
                    )));
                }
                Some(base_descriptor) if base_descriptor.enum_variants().is_some() => {
                    return Err(Error::InvalidCatalog(format!(
                        "{} cannot extend enum {}",
                        descriptor.name, base
                    )));
                }
                Some(_) => {}
            }
        }

        // Walks the chain; fails on cycles.
        let members = catalog.declared_members(&descriptor.name)?;
        let mut seen = BTreeSet::new();
        for declared in &members {
            if !seen.insert(declared.member.name.as_str()) {
                return Err(Error::InvalidCatalog(format!(
                    "duplicate member name: {}.{}",
                    descriptor.name, declared.member.name
                )));
            }
        }

        for (index, ctor) in descriptor.constructors.iter().enumerate() {
            let mut params = BTreeSet::new();
            for param in &ctor.params {
                if !params.insert(param.name.as_str()) {
                    return Err(Error::InvalidCatalog(format!(
                        "duplicate parameter {} in {} constructor #{index}",
                        param.name, descriptor.name
                    )));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::TypeDescriptor;
    use crate::types::TypeRef;

    #[test]
    fn rejects_unknown_member_type() {
        let result = TypeCatalog::from_descriptors([
            TypeDescriptor::composite("Order").member("customer", TypeRef::named("Customer"))
        ]);
        assert!(matches!(result, Err(Error::InvalidCatalog(_))));
    }

    #[test]
    fn rejects_inheritance_cycle() {
        let result = TypeCatalog::from_descriptors([
            TypeDescriptor::composite("A").extends("B"),
            TypeDescriptor::composite("B").extends("A"),
        ]);
        assert!(matches!(result, Err(Error::InvalidCatalog(_))));
    }

    #[test]
    fn rejects_shadowed_member() {
        let result = TypeCatalog::from_descriptors([
            TypeDescriptor::abstract_type("Base").member("name", TypeRef::string()),
            TypeDescriptor::composite("Derived")
                .extends("Base")
                .member("name", TypeRef::string()),
        ]);
        assert!(matches!(result, Err(Error::InvalidCatalog(_))));
    }

    #[test]
    fn accepts_self_reference() {
        let result = TypeCatalog::from_descriptors([TypeDescriptor::composite("Node")
            .member("child", TypeRef::named("Node"))
            .member("children", TypeRef::list(TypeRef::named("Node")))]);
        assert!(result.is_ok());
    }
}
