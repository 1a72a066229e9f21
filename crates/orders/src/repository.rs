//! Persistence boundary for the `Order` aggregate.
//!
//! The domain depends on this contract only; adapters (in-memory, Postgres)
//! live in the infrastructure layer.

use std::sync::Arc;

use thiserror::Error;

use ordering_core::Id;

use crate::order::Order;

/// Repository operation error.
///
/// These are **infrastructure errors** (storage, corrupt records) as opposed to
/// domain errors (validation, invariants). Callers treat them as opaque.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage failure: {0}")]
    Storage(String),

    #[error("stored order {id} could not be reconstructed: {reason}")]
    CorruptRecord { id: String, reason: String },
}

/// Order persistence contract.
///
/// - `find_by_id` reports absence as `Ok(None)`, never as an error.
/// - `save` is an upsert keyed by the order id; saving the same order twice
///   leaves one stored order.
/// - `delete` of an unknown id is a no-op.
/// - `find_all` order is storage-defined.
///
/// No version check happens between a load and a later save: concurrent
/// writers to the same id are last-write-wins.
#[async_trait::async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Order>, RepositoryError>;

    async fn find_by_id(&self, id: &Id) -> Result<Option<Order>, RepositoryError>;

    async fn save(&self, order: &Order) -> Result<(), RepositoryError>;

    async fn delete(&self, id: &Id) -> Result<(), RepositoryError>;
}

#[async_trait::async_trait]
impl<R> OrderRepository for Arc<R>
where
    R: OrderRepository + ?Sized,
{
    async fn find_all(&self) -> Result<Vec<Order>, RepositoryError> {
        (**self).find_all().await
    }

    async fn find_by_id(&self, id: &Id) -> Result<Option<Order>, RepositoryError> {
        (**self).find_by_id(id).await
    }

    async fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        (**self).save(order).await
    }

    async fn delete(&self, id: &Id) -> Result<(), RepositoryError> {
        (**self).delete(id).await
    }
}
