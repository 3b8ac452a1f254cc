//! Category Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Category;
use crate::utils::text::slugify;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category ORDER BY name")
            .await?
            .take(0)?;
        Ok(categories)
    }

    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Category>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM category WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug.to_string()))
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    /// Create a new category; slug derived from the name
    pub async fn create(&self, name: &str) -> RepoResult<Category> {
        let slug = slugify(name);
        if self.find_by_slug(&slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Category '{name}' already exists"
            )));
        }

        let category = Category {
            id: None,
            name: name.to_string(),
            slug,
        };

        let created: Option<Category> = self.base.db().create(TABLE).content(category).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    /// Hard delete by slug
    pub async fn delete_by_slug(&self, slug: &str) -> RepoResult<bool> {
        self.base
            .db()
            .query("DELETE category WHERE slug = $slug")
            .bind(("slug", slug.to_string()))
            .await?;
        Ok(true)
    }
}
