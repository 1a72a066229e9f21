use std::sync::Arc;

use ordering_application::OrderUseCase;
use ordering_infra::{Config, InMemoryOrderRepository, PostgresOrderRepository, StorageBackend};
use ordering_orders::{OrderRepository, RepositoryError};

/// The use case as served over HTTP, over whichever backend was configured.
pub type OrderService = OrderUseCase<Arc<dyn OrderRepository>>;

/// Build the order service for the configured storage backend.
pub async fn build_services(config: &Config) -> Result<Arc<OrderService>, RepositoryError> {
    let repo: Arc<dyn OrderRepository> = match config.storage() {
        StorageBackend::InMemory => {
            tracing::info!(backend = "in_memory", "order storage selected");
            Arc::new(InMemoryOrderRepository::new())
        }
        StorageBackend::Postgres { url } => {
            tracing::info!(backend = "postgres", "order storage selected");
            Arc::new(PostgresOrderRepository::connect(&url).await?)
        }
    };

    Ok(Arc::new(OrderUseCase::new(repo)))
}

/// Order service over a fresh in-memory repository.
pub fn in_memory_services() -> Arc<OrderService> {
    Arc::new(OrderUseCase::new(Arc::new(InMemoryOrderRepository::new())))
}
