use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{post, put},
    Json, Router,
};
use serde::Serialize;

use ordering_application::{CreateOrderRequest, UpdateOrderRequest};
use ordering_orders::OrderSnapshot;

use crate::app::errors;
use crate::app::services::OrderService;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_order).get(list_orders))
        .route("/:id", put(update_order).delete(delete_order))
        .route("/:id/complete", post(complete_order))
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Debug, Serialize)]
struct OrderListResponse {
    items: Vec<OrderSnapshot>,
}

fn message(status: StatusCode, message: String) -> axum::response::Response {
    (status, Json(MessageResponse { message })).into_response()
}

pub async fn create_order(
    Extension(services): Extension<Arc<OrderService>>,
    Json(body): Json<CreateOrderRequest>,
) -> axum::response::Response {
    match services.create_order(body).await {
        Ok(msg) => message(StatusCode::CREATED, msg),
        Err(e) => errors::use_case_error_to_response(e),
    }
}

pub async fn list_orders(
    Extension(services): Extension<Arc<OrderService>>,
) -> axum::response::Response {
    match services.get_all_orders().await {
        Ok(items) => Json(OrderListResponse { items }).into_response(),
        Err(e) => errors::use_case_error_to_response(e),
    }
}

/// The path id is authoritative; an `id` in the body is ignored.
pub async fn update_order(
    Extension(services): Extension<Arc<OrderService>>,
    Path(id): Path<String>,
    Json(mut body): Json<UpdateOrderRequest>,
) -> axum::response::Response {
    body.id = id;
    match services.update_order(body).await {
        Ok(msg) => message(StatusCode::OK, msg),
        Err(e) => errors::use_case_error_to_response(e),
    }
}

pub async fn complete_order(
    Extension(services): Extension<Arc<OrderService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.complete_order(&id).await {
        Ok(msg) => message(StatusCode::OK, msg),
        Err(e) => errors::use_case_error_to_response(e),
    }
}

pub async fn delete_order(
    Extension(services): Extension<Arc<OrderService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.delete_order(&id).await {
        Ok(msg) => message(StatusCode::OK, msg),
        Err(e) => errors::use_case_error_to_response(e),
    }
}
