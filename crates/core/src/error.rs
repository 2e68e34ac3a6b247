//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic outcomes of hierarchy operations.
/// Persistence concerns belong to the store layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Attempted creation of a name that already exists at that level.
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// Attempted removal or access of a name absent at that level.
    #[error("{0} does not exist")]
    NotFound(String),

    /// Relocation targeted a nested shelf that was never created.
    ///
    /// This is a usage error: targets must be created through the editor
    /// before any item is filed into them.
    #[error("relocation target {0} does not exist")]
    MissingTarget(String),
}

impl DomainError {
    pub fn already_exists(what: impl Into<String>) -> Self {
        Self::AlreadyExists(what.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn missing_target(what: impl Into<String>) -> Self {
        Self::MissingTarget(what.into())
    }
}
