//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: picks the storage backend and builds the use case
//! - `routes/`: HTTP routes + handlers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod errors;
pub mod routes;
pub mod services;

use services::OrderService;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<OrderService>) -> Router {
    Router::new()
        .route("/", get(routes::system::root))
        .route("/health", get(routes::system::health))
        .nest("/orders", routes::orders::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::log_requests))
                .layer(Extension(services)),
        )
}
