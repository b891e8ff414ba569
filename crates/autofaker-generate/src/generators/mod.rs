use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use autofaker_core::{TypeIntrospector, TypeRef, Value};

use crate::context::GenerationContext;
use crate::errors::GenerationError;

pub mod collections;
pub mod custom;
pub mod enums;
pub mod primitives;

pub use custom::{FnGenerator, ImplementationGenerator};

/// Generator families, matched structurally when no exact generator exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GeneratorFamily {
    Dictionary,
    Set,
    Array,
    List,
    Nullable,
    Enum,
}

impl GeneratorFamily {
    /// Resolution order. Fixed so that a type matching several families
    /// always resolves the same way.
    pub const PRIORITY: [GeneratorFamily; 6] = [
        GeneratorFamily::Dictionary,
        GeneratorFamily::Set,
        GeneratorFamily::Array,
        GeneratorFamily::List,
        GeneratorFamily::Nullable,
        GeneratorFamily::Enum,
    ];

    pub fn matches(self, ty: &TypeRef, introspector: &dyn TypeIntrospector) -> bool {
        match self {
            GeneratorFamily::Dictionary => matches!(ty, TypeRef::Map(_, _)),
            GeneratorFamily::Set => matches!(ty, TypeRef::Set(_)),
            GeneratorFamily::Array => matches!(ty, TypeRef::Array(_)),
            GeneratorFamily::List => matches!(ty, TypeRef::List(_)),
            GeneratorFamily::Nullable => matches!(ty, TypeRef::Nullable(_)),
            GeneratorFamily::Enum => ty
                .as_named()
                .and_then(|name| introspector.descriptor(name))
                .is_some_and(|descriptor| descriptor.enum_variants().is_some()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GeneratorFamily::Dictionary => "dictionary",
            GeneratorFamily::Set => "set",
            GeneratorFamily::Array => "array",
            GeneratorFamily::List => "list",
            GeneratorFamily::Nullable => "nullable",
            GeneratorFamily::Enum => "enum",
        }
    }
}

impl fmt::Display for GeneratorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a generator is registered for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeneratorTarget {
    Exact(TypeRef),
    Family(GeneratorFamily),
}

/// Value-generating strategy for one type or type family.
pub trait Generator: Send + Sync {
    fn id(&self) -> &str;

    fn target(&self) -> GeneratorTarget;

    /// Produce a value for `ty`, or `None` when it cannot be generated here.
    fn generate(
        &self,
        ty: &TypeRef,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Option<Value>, GenerationError>;
}

/// Generator registry: exact types first, then families in priority order.
///
/// Built once at configuration time and read-only afterwards.
#[derive(Clone)]
pub struct GeneratorRegistry {
    exact: BTreeMap<TypeRef, Arc<dyn Generator>>,
    families: BTreeMap<GeneratorFamily, Arc<dyn Generator>>,
    by_id: BTreeMap<String, Arc<dyn Generator>>,
}

impl GeneratorRegistry {
    /// Registry with every primitive kind and all families.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        primitives::register(&mut registry);
        collections::register(&mut registry);
        enums::register(&mut registry);
        registry
    }

    /// Registry with nothing registered; every type resolves to `None`.
    pub fn empty() -> Self {
        Self {
            exact: BTreeMap::new(),
            families: BTreeMap::new(),
            by_id: BTreeMap::new(),
        }
    }

    /// Register a generator, replacing any earlier one for the same target.
    pub fn register_generator(&mut self, generator: Box<dyn Generator>) {
        let generator: Arc<dyn Generator> = Arc::from(generator);
        let replaced = match generator.target() {
            GeneratorTarget::Exact(ty) => self.exact.insert(ty, Arc::clone(&generator)),
            GeneratorTarget::Family(family) => {
                self.families.insert(family, Arc::clone(&generator))
            }
        };
        if let Some(previous) = replaced {
            self.by_id.remove(previous.id());
        }
        self.by_id.insert(generator.id().to_string(), generator);
    }

    pub fn generator(&self, id: &str) -> Option<&dyn Generator> {
        self.by_id.get(id).map(|generator| generator.as_ref())
    }

    /// Registered ids, sorted.
    pub fn generator_ids(&self) -> Vec<&str> {
        self.by_id.keys().map(String::as_str).collect()
    }

    pub fn exact(&self, ty: &TypeRef) -> Option<&dyn Generator> {
        self.exact.get(ty).map(|generator| generator.as_ref())
    }

    pub fn family(
        &self,
        ty: &TypeRef,
        introspector: &dyn TypeIntrospector,
    ) -> Option<GeneratorFamily> {
        GeneratorFamily::PRIORITY
            .into_iter()
            .find(|family| family.matches(ty, introspector))
    }

    /// Resolve a generator for `ty`; `None` means "treat as composite".
    pub fn resolve(
        &self,
        ty: &TypeRef,
        introspector: &dyn TypeIntrospector,
    ) -> Option<&dyn Generator> {
        if let Some(generator) = self.exact(ty) {
            return Some(generator);
        }
        let family = self.family(ty, introspector)?;
        self.families.get(&family).map(|generator| generator.as_ref())
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("generators", &self.generator_ids())
            .finish()
    }
}
