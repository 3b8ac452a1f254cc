//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::CategoryRepository;
use crate::utils::{AppError, AppResult};
use shared::models::{Category as SharedCategory, CategoryCreate};

/// GET /api/categories - list all categories
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<SharedCategory>>> {
    let repo = CategoryRepository::new(state.db.clone());
    let categories = repo.find_all().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// GET /api/category/:slug - read one category
pub async fn read(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<SharedCategory>> {
    let repo = CategoryRepository::new(state.db.clone());
    let category = repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Category '{slug}' not found")))?;
    Ok(Json(category.into()))
}

/// POST /api/category - create a category (admin)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<SharedCategory>> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Name is required"));
    }

    let repo = CategoryRepository::new(state.db.clone());
    let category = repo.create(name).await?;
    Ok(Json(category.into()))
}

/// DELETE /api/category/:slug - delete a category (admin)
pub async fn remove(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = CategoryRepository::new(state.db.clone());
    repo.delete_by_slug(&slug).await?;
    Ok(Json(
        serde_json::json!({"message": "Category deleted successfully"}),
    ))
}
