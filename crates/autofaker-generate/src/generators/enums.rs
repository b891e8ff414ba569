use autofaker_core::{TypeRef, Value};
use rand::Rng;

use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::generators::{Generator, GeneratorFamily, GeneratorRegistry, GeneratorTarget};

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register_generator(Box::new(EnumGenerator));
}

/// Picks one declared variant uniformly.
struct EnumGenerator;

impl Generator for EnumGenerator {
    fn id(&self) -> &str {
        "family.enum"
    }

    fn target(&self) -> GeneratorTarget {
        GeneratorTarget::Family(GeneratorFamily::Enum)
    }

    fn generate(
        &self,
        ty: &TypeRef,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Option<Value>, GenerationError> {
        let variants = ty
            .as_named()
            .and_then(|name| ctx.config().catalog().descriptor(name))
            .and_then(|descriptor| descriptor.enum_variants());
        let Some(variants) = variants else {
            return Ok(None);
        };
        if variants.is_empty() {
            return Ok(None);
        }
        let index = ctx.rng().random_range(0..variants.len());
        Ok(Some(Value::Enum(variants[index].clone())))
    }
}
