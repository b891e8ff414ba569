//! Core contracts for autofaker.
//!
//! This crate defines the type model the generation engine walks: type
//! references, descriptors, the dynamic value model, and the introspection
//! capability with its descriptor-backed catalog.

pub mod catalog;
pub mod descriptor;
pub mod error;
pub mod graph;
pub mod types;
pub mod validation;
pub mod value;

pub use catalog::{DeclaredMember, TypeCatalog, TypeIntrospector};
pub use descriptor::{
    ConstructFn, ConstructorDescriptor, MemberDescriptor, ParamDescriptor, TypeDescriptor,
    TypeKind,
};
pub use error::{Error, Result};
pub use graph::{TypeGraphReport, TypeGraphSummary, build_type_graph_report};
pub use types::{PrimitiveKind, TypeRef};
pub use validation::validate_catalog;
pub use value::{Instance, Value};
