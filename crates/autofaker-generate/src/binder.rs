use std::fmt;
use std::sync::Arc;

use autofaker_core::Instance;
use tracing::{debug, warn};

use crate::classify::is_generable;
use crate::config::GenerationConfig;
use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::populate::populate_members;

/// Instance construction and member population strategy.
///
/// The default [`AutoBinder`] picks a constructor through the catalog and
/// fills writable members; replace it to change either step wholesale.
pub trait Binder: Send + Sync {
    /// Build a bare instance of `type_name`, or `None` when no constructor
    /// can be satisfied.
    fn create_instance(
        &self,
        type_name: &str,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Option<Instance>, GenerationError>;

    fn populate_instance(
        &self,
        instance: &mut Instance,
        type_name: &str,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<(), GenerationError>;
}

pub type InstantiatorFn =
    Arc<dyn Fn(&mut GenerationContext<'_>) -> Result<Instance, GenerationError> + Send + Sync>;

/// User-supplied construction for one type, bypassing the binder's
/// `create_instance`.
#[derive(Clone)]
pub struct ConstructionOverride {
    factory: InstantiatorFn,
    complete: bool,
}

impl ConstructionOverride {
    pub fn new(
        factory: impl Fn(&mut GenerationContext<'_>) -> Result<Instance, GenerationError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            factory: Arc::new(factory),
            complete: false,
        }
    }

    /// Mark the produced instance as final: rules and member population are
    /// skipped for it.
    pub fn complete(mut self) -> Self {
        self.complete = true;
        self
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn instantiate(
        &self,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Instance, GenerationError> {
        (self.factory)(ctx)
    }
}

impl fmt::Debug for ConstructionOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructionOverride")
            .field("complete", &self.complete)
            .finish_non_exhaustive()
    }
}

pub(crate) struct Created {
    pub instance: Instance,
    pub complete: bool,
}

/// Construct `type_name`: a registered override first, the binder otherwise.
pub(crate) fn create(
    type_name: &str,
    ctx: &mut GenerationContext<'_>,
) -> Result<Option<Created>, GenerationError> {
    let config = ctx.config();
    if let Some(instantiator) = config.instantiator(type_name) {
        debug!(ty = type_name, "using construction override");
        let instance = instantiator.instantiate(ctx)?;
        return Ok(Some(Created {
            instance,
            complete: instantiator.is_complete(),
        }));
    }
    Ok(config
        .binder()
        .create_instance(type_name, ctx)?
        .map(|instance| Created {
            instance,
            complete: false,
        }))
}

/// Catalog-driven binder.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoBinder;

impl AutoBinder {
    /// Indices of constructors whose parameter types are all generable, most
    /// parameters first. Ties keep declaration order.
    pub fn eligible_constructors(
        type_name: &str,
        config: &GenerationConfig,
    ) -> Result<Vec<usize>, GenerationError> {
        let constructors = config.catalog().constructors(type_name)?;
        let mut eligible: Vec<usize> = constructors
            .iter()
            .enumerate()
            .filter(|(_, constructor)| {
                constructor
                    .params
                    .iter()
                    .all(|param| is_generable(&param.ty, config))
            })
            .map(|(index, _)| index)
            .collect();
        eligible.sort_by_key(|index| std::cmp::Reverse(constructors[*index].arity()));
        Ok(eligible)
    }

    /// First choice among [`eligible_constructors`](Self::eligible_constructors).
    pub fn select_constructor(
        type_name: &str,
        config: &GenerationConfig,
    ) -> Result<Option<usize>, GenerationError> {
        Ok(Self::eligible_constructors(type_name, config)?.first().copied())
    }
}

impl Binder for AutoBinder {
    /// Tries eligible constructors in order; one whose arguments are refused
    /// at runtime gives way to the next.
    fn create_instance(
        &self,
        type_name: &str,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Option<Instance>, GenerationError> {
        let config = ctx.config();
        let eligible = Self::eligible_constructors(type_name, config)?;
        if eligible.is_empty() {
            debug!(ty = type_name, path = %ctx.path(), "no viable constructor");
            ctx.report_mut().record_ungenerable(type_name);
            return Ok(None);
        }
        let constructors = config.catalog().constructors(type_name)?;

        'constructors: for index in eligible {
            let Some(constructor) = constructors.get(index) else {
                continue;
            };
            let mut args = Vec::with_capacity(constructor.arity());
            for param in &constructor.params {
                match ctx.generate_for_member(&param.ty, &param.name)? {
                    Some(value) => args.push(value),
                    None => {
                        debug!(
                            ty = type_name,
                            constructor = index,
                            param = %param.name,
                            path = %ctx.path(),
                            "constructor argument not generated"
                        );
                        continue 'constructors;
                    }
                }
            }
            return match config.catalog().construct(type_name, index, &args) {
                Ok(instance) => Ok(Some(instance)),
                Err(autofaker_core::Error::Construction { ty, message }) => {
                    let path = ctx.path();
                    warn!(ty = %ty, path = %path, error = %message, "construction failed");
                    Err(GenerationError::Construction { ty, path, message })
                }
                Err(err) => Err(err.into()),
            };
        }

        debug!(ty = type_name, path = %ctx.path(), "every constructor refused");
        Ok(None)
    }

    fn populate_instance(
        &self,
        instance: &mut Instance,
        type_name: &str,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<(), GenerationError> {
        populate_members(instance, type_name, ctx)
    }
}
