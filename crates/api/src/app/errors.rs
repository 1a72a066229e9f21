use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use ordering_application::UseCaseError;
use ordering_core::DomainError;

pub fn use_case_error_to_response(err: UseCaseError) -> axum::response::Response {
    match err {
        UseCaseError::Domain(DomainError::Validation(e)) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", e.message())
        }
        UseCaseError::Domain(DomainError::InvariantViolation(msg)) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        UseCaseError::Domain(e @ DomainError::NotFound { .. }) => {
            json_error(StatusCode::NOT_FOUND, "not_found", e.to_string())
        }
        UseCaseError::Repository(e) => {
            tracing::error!(error = %e, "repository failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", e.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
