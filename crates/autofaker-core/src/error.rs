use thiserror::Error;

/// Core error type shared across autofaker crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested type is not present in the catalog.
    #[error("unknown type: {0}")]
    UnknownType(String),
    /// The member does not exist on the type or any of its bases.
    #[error("unknown member: {ty}.{member}")]
    UnknownMember { ty: String, member: String },
    /// The member exists but cannot be assigned after construction.
    #[error("read-only member: {ty}.{member}")]
    ReadOnlyMember { ty: String, member: String },
    /// The catalog violates internal invariants.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    /// A constructor raised while building an instance.
    #[error("construction of {ty} failed: {message}")]
    Construction { ty: String, message: String },
}

/// Convenience alias for results returned by autofaker crates.
pub type Result<T> = std::result::Result<T, Error>;
