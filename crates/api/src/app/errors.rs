use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use tally_core::DomainError;

/// A field-level validation failure, surfaced in the 422 `details` array.
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
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

/// 422 with field-level detail for request bodies that parsed but failed
/// schema constraints.
pub fn validation_failed(details: Vec<FieldError>) -> axum::response::Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        axum::Json(json!({
            "error": "validation_error",
            "message": "request validation failed",
            "details": details
                .iter()
                .map(|d| json!({ "field": d.field, "message": d.message }))
                .collect::<Vec<_>>(),
        })),
    )
        .into_response()
}

/// 422 for bodies that never deserialized (malformed JSON, wrong types,
/// missing fields).
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(
        StatusCode::UNPROCESSABLE_ENTITY,
        "validation_error",
        rejection.body_text(),
    )
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg)
        }
        DomainError::Conflict(msg) => json_error(StatusCode::BAD_REQUEST, "conflict", msg),
        DomainError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
        DomainError::InvalidOperation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_operation", msg)
        }
        err @ DomainError::InsufficientFunds => {
            json_error(StatusCode::BAD_REQUEST, "insufficient_funds", err.to_string())
        }
        // Ids are opaque to callers; an unparseable id is an unknown user.
        DomainError::InvalidId(_) => json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
    }
}
