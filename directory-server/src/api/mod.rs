//! API Route Module
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`members`] - member CRUD, photo, search, related
//! - [`categories`] - category management
//! - [`tags`] - tag management
//! - [`form`] - contact notification forms

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::require_auth;
use crate::core::ServerState;

pub mod convert;

pub mod categories;
pub mod form;
pub mod health;
pub mod members;
pub mod tags;

/// Multipart bodies carry the photo, so the limit sits above the photo
/// cap with headroom for the text fields.
const BODY_LIMIT_BYTES: usize = 12 * 1024 * 1024;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(members::router())
        .merge(categories::router())
        .merge(tags::router())
        .merge(form::router())
        .merge(health::router())
}

/// Build the fully configured application with all middleware.
///
/// Used by both the HTTP server and the integration tests.
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    let app = build_router()
        // ========== Tower HTTP Middleware ==========
        // Body limit - multipart uploads up to the photo cap
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        // Compression - gzip responses
        .layer(CompressionLayer::new())
        // Trace - request tracing at INFO level
        .layer(TraceLayer::new_for_http())
        // ========== Application Middleware ==========
        // Request ID - unique id per request, echoed on the response
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // Admin gate for mutating routes, injects CurrentUser
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    // Cross-origin access is only for the local frontend in development;
    // production serves same-origin.
    if state.config.is_development() {
        if let Ok(origin) = state.config.client_url.parse::<HeaderValue>() {
            return app.layer(
                CorsLayer::new()
                    .allow_origin(origin)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }
        tracing::warn!(
            client_url = %state.config.client_url,
            "CLIENT_URL is not a valid origin, CORS disabled"
        );
    }

    app
}
