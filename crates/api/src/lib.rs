//! HTTP API: routing, request/response mapping and service wiring for orders.

pub mod app;
pub mod middleware;
