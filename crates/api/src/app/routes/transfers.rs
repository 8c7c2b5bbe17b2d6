use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::IntoResponse,
};

use tally_core::UserId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn make_transfer(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::TransferRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    if let Err(resp) = dto::validate_transfer(&body) {
        return resp;
    }

    // Ids are opaque; an unparseable id is reported the same way as an
    // unknown one, keeping the sender-then-receiver validation order.
    let from: UserId = match body.from_user_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "sender not found");
        }
    };
    let to: UserId = match body.to_user_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "receiver not found");
        }
    };

    match services.ledger.transfer(from, to, body.amount) {
        Ok(outcome) => (StatusCode::OK, Json(dto::transfer_to_json(outcome))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
