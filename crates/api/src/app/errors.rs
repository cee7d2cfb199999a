use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use stockroom_core::DomainError;
use stockroom_infra::StoreError;

use crate::app::dto::{ErrorBody, NotFoundBody};

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        Json(ErrorBody {
            error: code.to_string(),
            message: message.into(),
        }),
    )
        .into_response()
}

/// The fixed 404 body: `{"message":"Not found"}`.
pub fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundBody {
            message: "Not found".to_string(),
        }),
    )
        .into_response()
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::NotFound => not_found(),
        DomainError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::ConstraintViolation(msg) => {
            json_error(StatusCode::CONFLICT, "constraint_violation", msg)
        }
    }
}

/// Store failures without a domain meaning become an opaque 500; the detail
/// only goes to the log.
pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err.to_domain() {
        Some(domain) => domain_error_to_response(domain),
        None => {
            tracing::error!(error = %err, "catalog store failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal server error",
            )
        }
    }
}
