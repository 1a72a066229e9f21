//! Order repository adapters.
//!
//! Both implement `ordering_orders::OrderRepository`; the composition root
//! picks one based on configuration.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryOrderRepository;
pub use postgres::PostgresOrderRepository;
