use autofaker_core::{TypeRef, Value};
use tracing::debug;

use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::generators::{Generator, GeneratorFamily, GeneratorRegistry, GeneratorTarget};

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register_generator(Box::new(SequenceGenerator {
        id: "family.array",
        family: GeneratorFamily::Array,
    }));
    registry.register_generator(Box::new(SequenceGenerator {
        id: "family.list",
        family: GeneratorFamily::List,
    }));
    registry.register_generator(Box::new(SetGenerator));
    registry.register_generator(Box::new(DictionaryGenerator));
    registry.register_generator(Box::new(NullableGenerator));
}

/// Arrays and lists: `repeat_count` element attempts, ungenerated elements dropped.
struct SequenceGenerator {
    id: &'static str,
    family: GeneratorFamily,
}

impl Generator for SequenceGenerator {
    fn id(&self) -> &str {
        self.id
    }

    fn target(&self) -> GeneratorTarget {
        GeneratorTarget::Family(self.family)
    }

    fn generate(
        &self,
        ty: &TypeRef,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Option<Value>, GenerationError> {
        let element = match ty {
            TypeRef::Array(element) | TypeRef::List(element) => element,
            _ => return Ok(None),
        };
        let count = ctx.config().settings().repeat_count;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(value) = ctx.generate(element)? {
                items.push(value);
            }
        }
        if items.len() < count {
            debug!(
                ty = %ty,
                requested = count,
                generated = items.len(),
                "sequence elements not generated"
            );
        }
        Ok(Some(Value::List(items)))
    }
}

/// Sets keep the first occurrence of equal elements.
struct SetGenerator;

impl Generator for SetGenerator {
    fn id(&self) -> &str {
        "family.set"
    }

    fn target(&self) -> GeneratorTarget {
        GeneratorTarget::Family(GeneratorFamily::Set)
    }

    fn generate(
        &self,
        ty: &TypeRef,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Option<Value>, GenerationError> {
        let TypeRef::Set(element) = ty else {
            return Ok(None);
        };
        let count = ctx.config().settings().repeat_count;
        let mut items: Vec<Value> = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(value) = ctx.generate(element)?
                && !items.contains(&value)
            {
                items.push(value);
            }
        }
        Ok(Some(Value::List(items)))
    }
}

/// Dictionaries: entries whose key or value is not generated are dropped, as
/// are repeated keys.
struct DictionaryGenerator;

impl Generator for DictionaryGenerator {
    fn id(&self) -> &str {
        "family.dictionary"
    }

    fn target(&self) -> GeneratorTarget {
        GeneratorTarget::Family(GeneratorFamily::Dictionary)
    }

    fn generate(
        &self,
        ty: &TypeRef,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Option<Value>, GenerationError> {
        let TypeRef::Map(key_ty, value_ty) = ty else {
            return Ok(None);
        };
        let count = ctx.config().settings().repeat_count;
        let mut entries: Vec<(Value, Value)> = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(key) = ctx.generate(key_ty)? else {
                continue;
            };
            if entries.iter().any(|(existing, _)| *existing == key) {
                continue;
            }
            if let Some(value) = ctx.generate(value_ty)? {
                entries.push((key, value));
            }
        }
        Ok(Some(Value::Map(entries)))
    }
}

/// Nullable wrappers: the inner value, or null when it cannot be generated.
struct NullableGenerator;

impl Generator for NullableGenerator {
    fn id(&self) -> &str {
        "family.nullable"
    }

    fn target(&self) -> GeneratorTarget {
        GeneratorTarget::Family(GeneratorFamily::Nullable)
    }

    fn generate(
        &self,
        ty: &TypeRef,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Option<Value>, GenerationError> {
        let TypeRef::Nullable(inner) = ty else {
            return Ok(None);
        };
        Ok(Some(ctx.generate(inner)?.unwrap_or(Value::Null)))
    }
}
