//! Primitive value provider backed by the `fake` crate.

pub mod adapter;
pub mod locales;

pub use adapter::{FakeRsAdapter, PrimitiveHint, PrimitiveProvider};
pub use locales::LocaleKey;
