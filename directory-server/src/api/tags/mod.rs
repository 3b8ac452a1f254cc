//! Tag API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/tag", post(handler::create))
        .route("/api/tags", get(handler::list))
        .route("/api/tag/{slug}", get(handler::read).delete(handler::remove))
}
