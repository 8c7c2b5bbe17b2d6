use std::sync::Arc;

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use tally_core::UserId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_user).get(list_users))
        .route("/:id", get(get_user))
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateUserRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    if let Err(resp) = dto::validate_create_user(&body) {
        return resp;
    }

    match services.ledger.create_user(&body.name, &body.email, body.balance) {
        Ok(user) => (StatusCode::CREATED, Json(dto::user_to_json(user))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services
        .ledger
        .list_users()
        .into_iter()
        .map(dto::user_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(items)).into_response()
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: UserId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
    };

    match services.ledger.get_user(id) {
        Ok(user) => (StatusCode::OK, Json(dto::user_to_json(user))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
