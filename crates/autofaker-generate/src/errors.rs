use thiserror::Error;

/// Errors raised while building a configuration snapshot, before any traversal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("unknown type '{0}'")]
    UnknownType(String),
    #[error("unknown member '{member}' on type '{ty}'")]
    UnknownMember { ty: String, member: String },
    #[error("conflicting configuration: {0}")]
    Conflict(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors emitted by the generation engine.
///
/// Ungenerable types and exhausted recursion depth are not errors; they show
/// up as a `None` value for the affected subtree.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("construction of '{ty}' failed at {path}: {message}")]
    Construction {
        ty: String,
        path: String,
        message: String,
    },
    #[error("primitive provider failed for {kind}: {message}")]
    Primitive { kind: String, message: String },
    #[error("catalog error: {0}")]
    Catalog(#[from] autofaker_core::Error),
}
