use std::fmt;
use std::sync::Arc;

use crate::types::TypeRef;
use crate::value::{Instance, Value};

/// Constructor body: receives the generated arguments in parameter order.
///
/// Returning `Err` is a construction failure and aborts the whole request.
pub type ConstructFn = Arc<dyn Fn(&[Value]) -> Result<Instance, String> + Send + Sync>;

/// Structural kind of a catalog type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Composite,
    Abstract,
    Interface,
    /// Enum with its variant labels in declaration order.
    Enum(Vec<String>),
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Composite => "composite",
            TypeKind::Abstract => "abstract",
            TypeKind::Interface => "interface",
            TypeKind::Enum(_) => "enum",
        }
    }
}

/// A field or property declared on a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    pub name: String,
    pub ty: TypeRef,
    /// Whether the member can be assigned after construction.
    pub writable: bool,
}

/// A constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDescriptor {
    pub name: String,
    pub ty: TypeRef,
}

impl ParamDescriptor {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A constructor: ordered parameters plus an optional body.
///
/// Without a body the instance starts from member defaults and each argument
/// is assigned to the member sharing its name (case-insensitive).
#[derive(Clone, Default)]
pub struct ConstructorDescriptor {
    pub params: Vec<ParamDescriptor>,
    body: Option<ConstructFn>,
}

impl ConstructorDescriptor {
    pub fn new(params: Vec<ParamDescriptor>) -> Self {
        Self { params, body: None }
    }

    pub fn with_body(
        params: Vec<ParamDescriptor>,
        body: impl Fn(&[Value]) -> Result<Instance, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            params,
            body: Some(Arc::new(body)),
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn body(&self) -> Option<&ConstructFn> {
        self.body.as_ref()
    }
}

impl fmt::Debug for ConstructorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorDescriptor")
            .field("params", &self.params)
            .field("custom_body", &self.body.is_some())
            .finish()
    }
}

/// Descriptor for a catalog type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    pub name: String,
    pub kind: TypeKind,
    pub base: Option<String>,
    pub members: Vec<MemberDescriptor>,
    pub constructors: Vec<ConstructorDescriptor>,
}

impl TypeDescriptor {
    fn with_kind(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            base: None,
            members: Vec::new(),
            constructors: Vec::new(),
        }
    }

    pub fn composite(name: impl Into<String>) -> Self {
        Self::with_kind(name, TypeKind::Composite)
    }

    pub fn abstract_type(name: impl Into<String>) -> Self {
        Self::with_kind(name, TypeKind::Abstract)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::with_kind(name, TypeKind::Interface)
    }

    pub fn enumeration<I, S>(name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_kind(
            name,
            TypeKind::Enum(variants.into_iter().map(Into::into).collect()),
        )
    }

    pub fn extends(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Add a writable member.
    pub fn member(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.members.push(MemberDescriptor {
            name: name.into(),
            ty,
            writable: true,
        });
        self
    }

    /// Add a member that only a constructor can set.
    pub fn readonly_member(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.members.push(MemberDescriptor {
            name: name.into(),
            ty,
            writable: false,
        });
        self
    }

    pub fn constructor(mut self, constructor: ConstructorDescriptor) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.kind, TypeKind::Composite)
    }

    pub fn enum_variants(&self) -> Option<&[String]> {
        match &self.kind {
            TypeKind::Enum(variants) => Some(variants.as_slice()),
            _ => None,
        }
    }

    pub fn own_member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|member| member.name == name)
    }

    /// Every type reference this descriptor mentions (members, params).
    pub fn referenced_types(&self) -> impl Iterator<Item = &TypeRef> {
        self.members.iter().map(|member| &member.ty).chain(
            self.constructors
                .iter()
                .flat_map(|ctor| ctor.params.iter().map(|param| &param.ty)),
        )
    }
}
