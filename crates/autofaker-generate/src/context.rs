use std::ops::{Deref, DerefMut};

use autofaker_core::{PrimitiveKind, TypeRef, Value};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::GenerationConfig;
use crate::engine;
use crate::errors::GenerationError;
use crate::faker_rs::PrimitiveHint;
use crate::model::GenerationReport;
use crate::tracker::RecursionTracker;

/// Mutable state for one root request, threaded through the whole traversal.
///
/// A context is created fresh per root call and never shared; the
/// configuration it points at is read-only.
pub struct GenerationContext<'a> {
    config: &'a GenerationConfig,
    rng: ChaCha8Rng,
    tracker: RecursionTracker<'a>,
    parents: Vec<String>,
    member: Option<String>,
    report: GenerationReport,
}

impl<'a> GenerationContext<'a> {
    pub fn new(config: &'a GenerationConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            tracker: RecursionTracker::new(config.limits()),
            parents: Vec::new(),
            member: None,
            report: GenerationReport::default(),
        }
    }

    pub fn config(&self) -> &'a GenerationConfig {
        self.config
    }

    pub fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.rng
    }

    /// Generate a value for `ty` through the engine.
    pub fn generate(&mut self, ty: &TypeRef) -> Result<Option<Value>, GenerationError> {
        engine::generate(ty, self)
    }

    /// Like [`generate`](Self::generate), with `member` as the naming hint
    /// for primitive values.
    pub fn generate_for_member(
        &mut self,
        ty: &TypeRef,
        member: &str,
    ) -> Result<Option<Value>, GenerationError> {
        let previous = self.member.replace(member.to_string());
        let result = self.generate(ty);
        self.member = previous;
        result
    }

    pub fn produce_primitive(&mut self, kind: PrimitiveKind) -> Result<Value, GenerationError> {
        let hint = PrimitiveHint {
            member: self.member.as_deref(),
            locale: self.config.locale(),
        };
        self.config.primitives().produce(kind, &hint, &mut self.rng)
    }

    /// Composite types currently being generated, outermost first.
    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    /// Rendered parent chain for diagnostics.
    pub fn path(&self) -> String {
        if self.parents.is_empty() {
            "<root>".to_string()
        } else {
            self.parents.join(" -> ")
        }
    }

    pub fn depth(&self, ty: &str) -> usize {
        self.tracker.depth(ty)
    }

    pub fn report(&self) -> &GenerationReport {
        &self.report
    }

    pub(crate) fn report_mut(&mut self) -> &mut GenerationReport {
        &mut self.report
    }

    pub fn into_report(self) -> GenerationReport {
        self.report
    }

    /// Enter composite type `ty`. Returns `None` when depth limits refuse it.
    ///
    /// The root composite is not counted against recursion limits; every
    /// nested entry is. The returned scope leaves the type when dropped.
    pub(crate) fn enter(&mut self, ty: &str) -> Option<TypeScope<'_, 'a>> {
        let nested = !self.parents.is_empty();
        if nested {
            if let Some(max) = self.config.settings().tree_depth
                && self.parents.len() > max
            {
                debug!(ty, tree_depth = max, path = %self.path(), "tree depth reached");
                self.report.record_depth_refusal(ty);
                return None;
            }
            if !self.tracker.enter(ty) {
                debug!(
                    ty,
                    depth = self.tracker.depth(ty),
                    path = %self.path(),
                    "recursion depth reached"
                );
                self.report.record_depth_refusal(ty);
                return None;
            }
        }
        self.parents.push(ty.to_string());
        Some(TypeScope {
            ctx: self,
            ty: ty.to_string(),
            counted: nested,
        })
    }
}

/// Guard for an entered composite type; leaves it on every exit path.
pub(crate) struct TypeScope<'c, 'a> {
    ctx: &'c mut GenerationContext<'a>,
    ty: String,
    counted: bool,
}

impl<'a> Deref for TypeScope<'_, 'a> {
    type Target = GenerationContext<'a>;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl DerefMut for TypeScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl Drop for TypeScope<'_, '_> {
    fn drop(&mut self) {
        self.ctx.parents.pop();
        if self.counted {
            self.ctx.tracker.leave(&self.ty);
        }
    }
}

#[cfg(test)]
mod tests {
    use autofaker_core::{TypeCatalog, TypeDescriptor};

    use super::*;
    use crate::config::ConfigBuilder;

    fn config(depth: usize) -> GenerationConfig {
        let catalog = TypeCatalog::from_descriptors([
            TypeDescriptor::composite("Node").member("next", TypeRef::named("Node"))
        ])
        .expect("valid catalog");
        ConfigBuilder::new(catalog)
            .with_recursive_depth(depth)
            .build()
            .expect("valid config")
    }

    #[test]
    fn root_entry_is_not_counted() {
        let config = config(1);
        let mut ctx = GenerationContext::new(&config, 1);
        let mut root = ctx.enter("Node").expect("root enters");
        assert_eq!(root.depth("Node"), 0);
        {
            let nested = root.enter("Node").expect("first nested entry");
            assert_eq!(nested.depth("Node"), 1);
            assert_eq!(nested.path(), "Node -> Node");
        }
        assert!(root.enter("Node").is_some());
    }

    #[test]
    fn scope_drop_releases_depth_and_parents() {
        let config = config(1);
        let mut ctx = GenerationContext::new(&config, 1);
        {
            let mut root = ctx.enter("Node").expect("root enters");
            let mut nested = root.enter("Node").expect("nested enters");
            assert!(nested.enter("Node").is_none());
            assert_eq!(nested.report().depth_refusals.get("Node"), Some(&1));
        }
        assert!(ctx.parents().is_empty());
        assert_eq!(ctx.depth("Node"), 0);
        assert_eq!(ctx.path(), "<root>");
    }
}
