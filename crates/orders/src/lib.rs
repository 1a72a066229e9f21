//! Orders domain module.
//!
//! This crate contains the business rules for purchase orders, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage), plus the
//! persistence contract the application layer depends on.

pub mod order;
pub mod repository;

pub use order::{
    DiscountCode, Order, OrderLine, OrderLineSnapshot, OrderSnapshot, OrderStatus,
};
pub use repository::{OrderRepository, RepositoryError};
