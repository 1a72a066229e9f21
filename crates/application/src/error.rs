use thiserror::Error;

use ordering_core::{DomainError, ValidationError};
use ordering_orders::RepositoryError;

/// Failure of a use-case operation.
///
/// Domain errors are surfaced unmodified for the caller to map; repository
/// errors stay opaque infrastructure failures.
#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<ValidationError> for UseCaseError {
    fn from(value: ValidationError) -> Self {
        Self::Domain(DomainError::Validation(value))
    }
}
