//! Application layer: use-case orchestration between plain request data and
//! the `Order` aggregate, persisted through an `OrderRepository`.

pub mod error;
pub mod request;
pub mod use_case;

pub use error::UseCaseError;
pub use request::{CreateOrderRequest, OrderItemRequest, UpdateOrderRequest};
pub use use_case::OrderUseCase;
