use axum::{Json, http::StatusCode, response::IntoResponse};

pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "User Balance Service API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
