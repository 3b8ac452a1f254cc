//! Contact Form API Module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/contact", post(handler::contact))
        .route("/api/contact-blog-author", post(handler::contact_author))
}
