use std::sync::Arc;
use std::time::Instant;

use autofaker_core::{Instance, TypeRef, Value};
use tracing::{debug, info};

use crate::binder;
use crate::classify::{TypeClass, classify};
use crate::config::GenerationConfig;
use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::model::GenerationReport;
use crate::rules::apply_rules;

/// Value of one root request together with its counters.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub value: Option<Value>,
    pub report: GenerationReport,
}

/// Entry point for generating values from a shared configuration.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    config: Arc<GenerationConfig>,
}

impl GenerationEngine {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn from_shared(config: Arc<GenerationConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn generate_one(&self, ty: &TypeRef) -> Result<Option<Value>, GenerationError> {
        generate_one(ty, &self.config)
    }

    pub fn generate_with_report(&self, ty: &TypeRef) -> Result<GenerationResult, GenerationError> {
        let seed = hash_seed(self.config.settings().seed, &ty.to_string());
        run_root(ty, &self.config, seed)
    }

    pub fn generate_many(
        &self,
        ty: &TypeRef,
        count: usize,
    ) -> Result<Vec<Option<Value>>, GenerationError> {
        generate_many(ty, count, &self.config)
    }

    pub fn populate_existing(&self, instance: &mut Instance) -> Result<(), GenerationError> {
        populate_existing(instance, &self.config)
    }
}

/// Generate a single value of `ty`. `None` means the type is not generable.
pub fn generate_one(
    ty: &TypeRef,
    config: &GenerationConfig,
) -> Result<Option<Value>, GenerationError> {
    let seed = hash_seed(config.settings().seed, &ty.to_string());
    Ok(run_root(ty, config, seed)?.value)
}

/// Generate `count` independent values of `ty`, each its own root request.
pub fn generate_many(
    ty: &TypeRef,
    count: usize,
    config: &GenerationConfig,
) -> Result<Vec<Option<Value>>, GenerationError> {
    let start = Instant::now();
    let base_seed = hash_seed(config.settings().seed, &ty.to_string());
    let mut values = Vec::with_capacity(count);
    let mut report = GenerationReport::default();
    for index in 0..count {
        let result = run_root(ty, config, hash_index_seed(base_seed, index as u64))?;
        report.merge(result.report);
        values.push(result.value);
    }
    info!(
        ty = %ty,
        count,
        instances = report.instances_created,
        members = report.members_populated,
        duration_ms = start.elapsed().as_millis() as u64,
        "batch generated"
    );
    Ok(values)
}

/// Fill the writable members of an existing instance. Read-only members and
/// skipped members keep their current values.
pub fn populate_existing(
    instance: &mut Instance,
    config: &GenerationConfig,
) -> Result<(), GenerationError> {
    let type_name = instance.type_name().to_string();
    if config.catalog().descriptor(&type_name).is_none() {
        return Err(autofaker_core::Error::UnknownType(type_name).into());
    }
    let mut ctx = GenerationContext::new(config, hash_seed(config.settings().seed, &type_name));
    let Some(mut scope) = ctx.enter(&type_name) else {
        return Ok(());
    };
    apply_rules(instance, &type_name, &mut scope)?;
    config.binder().populate_instance(instance, &type_name, &mut scope)?;
    debug!(
        ty = %type_name,
        members = scope.report().members_populated,
        "existing instance populated"
    );
    Ok(())
}

fn run_root(
    ty: &TypeRef,
    config: &GenerationConfig,
    seed: u64,
) -> Result<GenerationResult, GenerationError> {
    let mut ctx = GenerationContext::new(config, seed);
    let value = generate(ty, &mut ctx)?;
    debug!(
        ty = %ty,
        generated = value.is_some(),
        instances = ctx.report().instances_created,
        "root request finished"
    );
    Ok(GenerationResult {
        value,
        report: ctx.into_report(),
    })
}

/// Dispatch `ty` to its generator or to composite construction.
pub(crate) fn generate(
    ty: &TypeRef,
    ctx: &mut GenerationContext<'_>,
) -> Result<Option<Value>, GenerationError> {
    let config = ctx.config();
    match classify(ty, config) {
        TypeClass::Composite => {
            let Some(name) = ty.as_named() else {
                return Ok(None);
            };
            Ok(build_composite(name, ctx)?.map(Value::Object))
        }
        TypeClass::Ungenerable(reason) => {
            debug!(ty = %ty, reason = %reason, path = %ctx.path(), "type not generated");
            ctx.report_mut().record_ungenerable(&ty.to_string());
            Ok(None)
        }
        _ => {
            let Some(generator) = config.registry().resolve(ty, config.catalog()) else {
                return Ok(None);
            };
            ctx.report_mut().record_generator_usage(generator.id());
            generator.generate(ty, ctx)
        }
    }
}

fn build_composite(
    type_name: &str,
    ctx: &mut GenerationContext<'_>,
) -> Result<Option<Instance>, GenerationError> {
    let Some(mut scope) = ctx.enter(type_name) else {
        return Ok(None);
    };
    let ctx = &mut *scope;
    let config = ctx.config();

    let Some(created) = binder::create(type_name, ctx)? else {
        return Ok(None);
    };
    let mut instance = created.instance;
    ctx.report_mut().record_instance();
    if created.complete {
        return Ok(Some(instance));
    }

    // An override may hand back a subtype of the requested type.
    let concrete = instance.type_name().to_string();
    apply_rules(&mut instance, &concrete, ctx)?;
    config.binder().populate_instance(&mut instance, &concrete, ctx)?;
    Ok(Some(instance))
}

/// Derive a per-request seed from the configured seed and a type name.
pub fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

/// Seed for element `index` of a batch.
pub fn hash_index_seed(base_seed: u64, index: u64) -> u64 {
    (base_seed ^ index.wrapping_mul(0x9e3779b97f4a7c15)).wrapping_mul(0x100000001b3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_are_stable_and_distinct() {
        assert_eq!(hash_seed(42, "Order"), hash_seed(42, "Order"));
        assert_ne!(hash_seed(42, "Order"), hash_seed(42, "OrderItem"));
        assert_ne!(hash_seed(42, "Order"), hash_seed(43, "Order"));

        let base = hash_seed(42, "Order");
        assert_ne!(hash_index_seed(base, 0), hash_index_seed(base, 1));
    }
}
