use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use ordena_core::{DomainError, ServiceError};

/// Map a service error to its HTTP response.
///
/// Kinds carry the status code; the body keeps the legacy human-readable
/// `"Error: ..."` message alongside a machine-readable code.
pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match &err {
        ServiceError::Domain(domain) => match domain {
            DomainError::Validation(_) => {
                json_error(StatusCode::BAD_REQUEST, "validation_error", err.to_string())
            }
            DomainError::OrderNotFound(_) => {
                json_error(StatusCode::NOT_FOUND, "not_found", err.to_string())
            }
            DomainError::AlreadyCompleted(_) => {
                json_error(StatusCode::CONFLICT, "conflict", err.to_string())
            }
            DomainError::NoPendingOrders => {
                json_error(StatusCode::NOT_FOUND, "no_pending_orders", err.to_string())
            }
        },
        ServiceError::Upstream(_) => {
            json_error(StatusCode::BAD_GATEWAY, "upstream_error", err.to_string())
        }
        ServiceError::Storage(_) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "storage_error",
            err.to_string(),
        ),
        ServiceError::Internal(_) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            err.to_string(),
        ),
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
            "message": format!("Error: {}", message.into()),
        })),
    )
        .into_response()
}
