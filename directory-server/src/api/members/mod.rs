//! Member API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/member", post(handler::create))
        .route("/api/members", get(handler::list))
        .route(
            "/api/members-categories-tags",
            post(handler::list_with_categories_tags),
        )
        .route(
            "/api/member/{slug}",
            get(handler::read)
                .put(handler::update)
                .delete(handler::remove),
        )
        .route("/api/member/photo/{slug}", get(handler::photo))
        .route("/api/members/search", get(handler::search))
        .route("/api/members/related", post(handler::related))
        .route("/api/members/by-user/{username}", get(handler::list_by_user))
}
