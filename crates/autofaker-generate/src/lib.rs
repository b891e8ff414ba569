//! Fake-data generation engine for autofaker.
//!
//! Walks arbitrary, possibly cyclic type graphs described by an
//! [`autofaker_core::TypeIntrospector`] and fills them with plausible values.
//! Recursion is bounded per type, and configuration is an immutable snapshot
//! that can be shared across threads.

pub mod binder;
pub mod classify;
pub mod config;
pub mod context;
pub mod engine;
pub mod errors;
pub mod faker_rs;
pub mod generators;
pub mod model;
pub mod populate;
pub mod rules;
pub mod tracker;

pub use binder::{AutoBinder, Binder, ConstructionOverride};
pub use classify::{TypeClass, UngenerableReason, classify, is_generable};
pub use config::{ConfigBuilder, GenerationConfig, SkipSet};
pub use context::GenerationContext;
pub use engine::{
    GenerationEngine, GenerationResult, generate_many, generate_one, populate_existing,
};
pub use errors::{ConfigError, GenerationError};
pub use faker_rs::{FakeRsAdapter, LocaleKey, PrimitiveHint, PrimitiveProvider};
pub use generators::{
    FnGenerator, Generator, GeneratorFamily, GeneratorRegistry, GeneratorTarget,
    ImplementationGenerator,
};
pub use model::{GenerationReport, GenerationSettings};
pub use rules::{MemberRule, MemberRules, RuleContext};
pub use tracker::{DepthLimits, RecursionTracker};
