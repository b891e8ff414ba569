use std::collections::BTreeMap;

use crate::descriptor::{ConstructorDescriptor, MemberDescriptor, TypeDescriptor};
use crate::error::{Error, Result};
use crate::validation::validate_catalog;
use crate::value::{Instance, Value};

/// A member as seen from a concrete type, with the type that declares it.
#[derive(Debug, Clone, Copy)]
pub struct DeclaredMember<'a> {
    pub declaring_type: &'a str,
    pub member: &'a MemberDescriptor,
}

/// Runtime type introspection used by the generation engine.
///
/// Implementations may be hand-built catalogs, derived descriptors or code
/// generation; the contract is what matters: members come in declared order
/// with inherited members included (base-most type first), and writes reject
/// unknown or read-only members.
pub trait TypeIntrospector: Send + Sync {
    /// All type names, sorted.
    fn type_names(&self) -> Vec<&str>;

    fn descriptor(&self, name: &str) -> Option<&TypeDescriptor>;

    fn declared_members(&self, name: &str) -> Result<Vec<DeclaredMember<'_>>>;

    /// Constructors usable to build `name`; empty for abstract, interface and enum types.
    fn constructors(&self, name: &str) -> Result<&[ConstructorDescriptor]>;

    fn construct(&self, name: &str, constructor: usize, args: &[Value]) -> Result<Instance>;

    fn member(&self, name: &str, member: &str) -> Option<DeclaredMember<'_>>;

    fn set_member(&self, instance: &mut Instance, member: &str, value: Value) -> Result<()>;
}

/// Descriptor-backed type catalog.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: BTreeMap<String, TypeDescriptor>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from descriptors and validate it.
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = TypeDescriptor>) -> Result<Self> {
        let mut catalog = Self::new();
        for descriptor in descriptors {
            catalog.insert(descriptor)?;
        }
        validate_catalog(&catalog)?;
        Ok(catalog)
    }

    pub fn insert(&mut self, mut descriptor: TypeDescriptor) -> Result<()> {
        if self.types.contains_key(&descriptor.name) {
            return Err(Error::InvalidCatalog(format!(
                "duplicate type name: {}",
                descriptor.name
            )));
        }
        if descriptor.is_composite() && descriptor.constructors.is_empty() {
            descriptor.constructors.push(ConstructorDescriptor::default());
        }
        self.types.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }

    fn require(&self, name: &str) -> Result<&TypeDescriptor> {
        self.types
            .get(name)
            .ok_or_else(|| Error::UnknownType(name.to_string()))
    }

    /// Inheritance chain from the base-most type down to `name`.
    fn lineage(&self, name: &str) -> Result<Vec<&TypeDescriptor>> {
        let mut chain = Vec::new();
        let mut current = Some(self.require(name)?);
        while let Some(descriptor) = current {
            if chain.len() > self.types.len() {
                return Err(Error::InvalidCatalog(format!(
                    "inheritance cycle through {name}"
                )));
            }
            chain.push(descriptor);
            current = match &descriptor.base {
                Some(base) => Some(self.require(base)?),
                None => None,
            };
        }
        chain.reverse();
        Ok(chain)
    }

    fn default_instance(&self, name: &str) -> Result<Instance> {
        let mut instance = Instance::new(name);
        for declared in self.declared_members(name)? {
            instance.set(
                declared.member.name.clone(),
                Value::default_for(&declared.member.ty),
            );
        }
        Ok(instance)
    }
}

impl TypeIntrospector for TypeCatalog {
    fn type_names(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }

    fn descriptor(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    fn declared_members(&self, name: &str) -> Result<Vec<DeclaredMember<'_>>> {
        let mut members = Vec::new();
        for descriptor in self.lineage(name)? {
            for member in &descriptor.members {
                members.push(DeclaredMember {
                    declaring_type: descriptor.name.as_str(),
                    member,
                });
            }
        }
        Ok(members)
    }

    fn constructors(&self, name: &str) -> Result<&[ConstructorDescriptor]> {
        let descriptor = self.require(name)?;
        if descriptor.is_composite() {
            Ok(descriptor.constructors.as_slice())
        } else {
            Ok(&[])
        }
    }

    fn construct(&self, name: &str, constructor: usize, args: &[Value]) -> Result<Instance> {
        let constructors = self.constructors(name)?;
        let ctor = constructors.get(constructor).ok_or_else(|| {
            Error::InvalidCatalog(format!("{name} has no constructor #{constructor}"))
        })?;
        if ctor.arity() != args.len() {
            return Err(Error::InvalidCatalog(format!(
                "{name} constructor #{constructor} expects {} arguments, got {}",
                ctor.arity(),
                args.len()
            )));
        }

        if let Some(body) = ctor.body() {
            return body(args).map_err(|message| Error::Construction {
                ty: name.to_string(),
                message,
            });
        }

        let mut instance = self.default_instance(name)?;
        let members = self.declared_members(name)?;
        for (param, arg) in ctor.params.iter().zip(args) {
            let target = members
                .iter()
                .find(|declared| declared.member.name.eq_ignore_ascii_case(&param.name));
            if let Some(declared) = target {
                instance.set(declared.member.name.clone(), arg.clone());
            }
        }
        Ok(instance)
    }

    fn member(&self, name: &str, member: &str) -> Option<DeclaredMember<'_>> {
        let lineage = self.lineage(name).ok()?;
        lineage.into_iter().rev().find_map(|descriptor| {
            descriptor.own_member(member).map(|found| DeclaredMember {
                declaring_type: descriptor.name.as_str(),
                member: found,
            })
        })
    }

    fn set_member(&self, instance: &mut Instance, member: &str, value: Value) -> Result<()> {
        let declared = self
            .member(instance.type_name(), member)
            .ok_or_else(|| Error::UnknownMember {
                ty: instance.type_name().to_string(),
                member: member.to_string(),
            })?;
        if !declared.member.writable {
            return Err(Error::ReadOnlyMember {
                ty: instance.type_name().to_string(),
                member: member.to_string(),
            });
        }
        instance.set(member, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ParamDescriptor;
    use crate::types::{PrimitiveKind, TypeRef};

    fn catalog() -> TypeCatalog {
        TypeCatalog::from_descriptors([
            TypeDescriptor::abstract_type("Entity")
                .readonly_member("id", PrimitiveKind::I64.into()),
            TypeDescriptor::composite("Customer")
                .extends("Entity")
                .member("name", TypeRef::string())
                .constructor(ConstructorDescriptor::new(vec![ParamDescriptor::new(
                    "Id",
                    PrimitiveKind::I64.into(),
                )])),
            TypeDescriptor::composite("Empty"),
        ])
        .expect("valid catalog")
    }

    #[test]
    fn declared_members_lists_base_first() {
        let catalog = catalog();
        let members = catalog.declared_members("Customer").expect("members");
        let names: Vec<_> = members
            .iter()
            .map(|declared| (declared.declaring_type, declared.member.name.as_str()))
            .collect();
        assert_eq!(names, vec![("Entity", "id"), ("Customer", "name")]);
    }

    #[test]
    fn default_body_assigns_params_by_name() {
        let catalog = catalog();
        let instance = catalog
            .construct("Customer", 0, &[Value::Int(9)])
            .expect("construct");
        assert_eq!(instance.value("id"), &Value::Int(9));
        assert_eq!(instance.value("name"), &Value::Text(String::new()));
    }

    #[test]
    fn implicit_constructor_and_abstract_types() {
        let catalog = catalog();
        assert_eq!(catalog.constructors("Empty").expect("ctors").len(), 1);
        assert!(catalog.constructors("Entity").expect("ctors").is_empty());
    }

    #[test]
    fn set_member_rejects_read_only_and_unknown() {
        let catalog = catalog();
        let mut instance = catalog
            .construct("Customer", 0, &[Value::Int(1)])
            .expect("construct");
        assert!(matches!(
            catalog.set_member(&mut instance, "id", Value::Int(2)),
            Err(Error::ReadOnlyMember { .. })
        ));
        assert!(matches!(
            catalog.set_member(&mut instance, "missing", Value::Null),
            Err(Error::UnknownMember { .. })
        ));
        catalog
            .set_member(&mut instance, "name", Value::Text("Ana".to_string()))
            .expect("writable member");
        assert_eq!(instance.value("name").as_str(), Some("Ana"));
    }

    #[test]
    fn body_failure_is_a_construction_error() {
        let catalog = TypeCatalog::from_descriptors([TypeDescriptor::composite("Broken")
            .constructor(ConstructorDescriptor::with_body(Vec::new(), |_| {
                Err("boom".to_string())
            }))])
        .expect("valid catalog");
        let err = catalog.construct("Broken", 0, &[]).expect_err("must fail");
        assert!(matches!(err, Error::Construction { ref message, .. } if message == "boom"));
    }
}
