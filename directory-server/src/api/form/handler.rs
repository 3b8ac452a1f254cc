//! Contact Form Handlers
//!
//! Both endpoints respond `{"success": true}` as soon as the mail is
//! handed to the delivery task. Delivery failures only reach the log.

use axum::{Json, extract::State};
use serde_json::json;

use crate::core::ServerState;
use crate::email::{AuthorContactForm, ContactForm};
use crate::utils::AppResult;

/// POST /api/contact - message the site operator
pub async fn contact(
    State(state): State<ServerState>,
    Json(form): Json<ContactForm>,
) -> AppResult<Json<serde_json::Value>> {
    match state.mailer.contact_email(&form) {
        Some(payload) => state.mailer.deliver(payload),
        None => tracing::warn!("EMAIL_TO not set, dropping contact form submission"),
    }
    Ok(Json(json!({"success": true})))
}

/// POST /api/contact-blog-author - message a member's author
pub async fn contact_author(
    State(state): State<ServerState>,
    Json(form): Json<AuthorContactForm>,
) -> AppResult<Json<serde_json::Value>> {
    let payload = state.mailer.author_email(&form);
    state.mailer.deliver(payload);
    Ok(Json(json!({"success": true})))
}
