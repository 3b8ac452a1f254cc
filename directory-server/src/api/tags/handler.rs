//! Tag API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::TagRepository;
use crate::utils::{AppError, AppResult};
use shared::models::{Tag as SharedTag, TagCreate};

/// GET /api/tags - list all tags
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<SharedTag>>> {
    let repo = TagRepository::new(state.db.clone());
    let tags = repo.find_all().await?;
    Ok(Json(tags.into_iter().map(Into::into).collect()))
}

/// GET /api/tag/:slug - read one tag
pub async fn read(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<SharedTag>> {
    let repo = TagRepository::new(state.db.clone());
    let tag = repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Tag '{slug}' not found")))?;
    Ok(Json(tag.into()))
}

/// POST /api/tag - create a tag (admin)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TagCreate>,
) -> AppResult<Json<SharedTag>> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Name is required"));
    }

    let repo = TagRepository::new(state.db.clone());
    let tag = repo.create(name).await?;
    Ok(Json(tag.into()))
}

/// DELETE /api/tag/:slug - delete a tag (admin)
pub async fn remove(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = TagRepository::new(state.db.clone());
    repo.delete_by_slug(&slug).await?;
    Ok(Json(
        serde_json::json!({"message": "Tag deleted successfully"}),
    ))
}
