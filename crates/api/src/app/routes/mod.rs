use axum::{
    Router,
    routing::{get, post},
};

pub mod system;
pub mod transfers;
pub mod users;

/// Router for all endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/transfer", post(transfers::make_transfer))
        .nest("/users", users::router())
}
