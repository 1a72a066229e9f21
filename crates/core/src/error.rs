//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// A value object's constructor invariant was violated (negative number,
/// blank address, empty item list, ...).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("validation failed: {message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, missing aggregates). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A business rule was violated (e.g. an illegal status transition).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The addressed aggregate does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

impl DomainError {
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}
