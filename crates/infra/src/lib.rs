//! Infrastructure layer: persistence adapters and configuration.

pub mod config;
pub mod repository;

pub use config::{Config, ConfigError, StorageBackend};
pub use repository::{InMemoryOrderRepository, PostgresOrderRepository};
