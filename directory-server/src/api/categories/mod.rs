//! Category API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/category", post(handler::create))
        .route("/api/categories", get(handler::list))
        .route(
            "/api/category/{slug}",
            get(handler::read).delete(handler::remove),
        )
}
