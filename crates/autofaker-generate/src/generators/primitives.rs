use autofaker_core::{PrimitiveKind, TypeRef, Value};

use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::generators::{Generator, GeneratorRegistry, GeneratorTarget};

pub fn register(registry: &mut GeneratorRegistry) {
    for &kind in PrimitiveKind::ALL {
        registry.register_generator(Box::new(PrimitiveGenerator::new(kind)));
    }
}

/// Exact generator for one primitive kind; values come from the configured
/// primitive provider.
pub struct PrimitiveGenerator {
    kind: PrimitiveKind,
    id: String,
}

impl PrimitiveGenerator {
    pub fn new(kind: PrimitiveKind) -> Self {
        Self {
            kind,
            id: format!("primitive.{}", kind.as_str()),
        }
    }
}

impl Generator for PrimitiveGenerator {
    fn id(&self) -> &str {
        &self.id
    }

    fn target(&self) -> GeneratorTarget {
        GeneratorTarget::Exact(TypeRef::Primitive(self.kind))
    }

    fn generate(
        &self,
        _ty: &TypeRef,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Option<Value>, GenerationError> {
        ctx.produce_primitive(self.kind).map(Some)
    }
}
