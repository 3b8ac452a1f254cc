//! Tag Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Tag;
use crate::utils::text::slugify;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "tag";

#[derive(Clone)]
pub struct TagRepository {
    base: BaseRepository,
}

impl TagRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Tag>> {
        let tags: Vec<Tag> = self
            .base
            .db()
            .query("SELECT * FROM tag ORDER BY name")
            .await?
            .take(0)?;
        Ok(tags)
    }

    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Tag>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM tag WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug.to_string()))
            .await?;
        let tags: Vec<Tag> = result.take(0)?;
        Ok(tags.into_iter().next())
    }

    /// Create a new tag; slug derived from the name
    pub async fn create(&self, name: &str) -> RepoResult<Tag> {
        let slug = slugify(name);
        if self.find_by_slug(&slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!("Tag '{name}' already exists")));
        }

        let tag = Tag {
            id: None,
            name: name.to_string(),
            slug,
        };

        let created: Option<Tag> = self.base.db().create(TABLE).content(tag).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create tag".to_string()))
    }

    /// Hard delete by slug
    pub async fn delete_by_slug(&self, slug: &str) -> RepoResult<bool> {
        self.base
            .db()
            .query("DELETE tag WHERE slug = $slug")
            .bind(("slug", slug.to_string()))
            .await?;
        Ok(true)
    }
}
