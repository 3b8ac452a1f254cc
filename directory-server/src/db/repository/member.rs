//! Member Repository
//!
//! All member persistence goes through here. Reads that feed API
//! responses use `FETCH` to resolve category/tag/postedBy references in
//! the same round trip; `photo` is omitted from every projection except
//! the dedicated photo lookup.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Member, MemberExpanded, MemberMerge, NewMember, Photo};
use crate::utils::text::{desc_of, excerpt_of, slugify};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::{Datetime, Thing};

const TABLE: &str = "member";

/// Default page size for the combined listing
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Default result cap for related-member lookups
pub const DEFAULT_RELATED_LIMIT: usize = 3;

#[derive(Clone)]
pub struct MemberRepository {
    base: BaseRepository,
}

#[derive(Deserialize)]
struct PhotoRow {
    #[serde(default)]
    photo: Option<Photo>,
}

#[derive(Deserialize)]
struct SlugRow {
    #[allow(dead_code)]
    slug: String,
}

impl MemberRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn slug_exists(&self, slug: &str) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query("SELECT slug FROM member WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug.to_string()))
            .await?;
        let rows: Vec<SlugRow> = result.take(0)?;
        Ok(!rows.is_empty())
    }

    /// Create a member. The complete document, including category and tag
    /// references, is built up front and persisted in a single write.
    pub async fn create(&self, data: NewMember) -> RepoResult<Member> {
        let slug = slugify(&data.cname);
        // A name with no alphanumerics slugifies to nothing; such a record
        // could never be addressed by the slug routes
        if slug.is_empty() {
            return Err(RepoError::Validation(
                "Company name must contain letters or numbers".to_string(),
            ));
        }
        if self.slug_exists(&slug).await? {
            return Err(RepoError::Duplicate(format!(
                "Member with slug '{slug}' already exists"
            )));
        }

        let now = Datetime::from(Utc::now());
        let member = Member {
            id: None,
            excerpt: excerpt_of(&data.body),
            slug,
            cname: data.cname,
            contact: data.contact,
            mobile: data.mobile,
            address: data.address,
            email: data.email,
            location: data.location,
            body: data.body,
            desc: None,
            photo: data.photo,
            categories: data.categories,
            tags: data.tags,
            posted_by: Some(data.posted_by),
            created_at: now.clone(),
            updated_at: now,
        };

        let created: Option<Member> = self.base.db().create(TABLE).content(member).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create member".to_string()))
    }

    /// All members with references expanded, insertion order
    pub async fn find_all_expanded(&self) -> RepoResult<Vec<MemberExpanded>> {
        let members: Vec<MemberExpanded> = self
            .base
            .db()
            .query(
                "SELECT * OMIT photo FROM member ORDER BY created_at \
                 FETCH categories, tags, posted_by",
            )
            .await?
            .take(0)?;
        Ok(members)
    }

    /// One page of members, newest first
    pub async fn find_page_expanded(
        &self,
        limit: usize,
        skip: usize,
    ) -> RepoResult<Vec<MemberExpanded>> {
        let members: Vec<MemberExpanded> = self
            .base
            .db()
            .query(
                "SELECT * OMIT photo FROM member ORDER BY created_at DESC \
                 LIMIT $limit START $skip FETCH categories, tags, posted_by",
            )
            .bind(("limit", limit))
            .bind(("skip", skip))
            .await?
            .take(0)?;
        Ok(members)
    }

    pub async fn find_by_slug_expanded(&self, slug: &str) -> RepoResult<Option<MemberExpanded>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * OMIT photo FROM member WHERE slug = $slug LIMIT 1 \
                 FETCH categories, tags, posted_by",
            )
            .bind(("slug", slug.to_string()))
            .await?;
        let members: Vec<MemberExpanded> = result.take(0)?;
        Ok(members.into_iter().next())
    }

    /// Merge supplied fields onto the record addressed by `slug`.
    ///
    /// The update payload carries no `slug` or `posted_by`, so the merge
    /// cannot rename the resource or reassign ownership. Excerpt and desc
    /// are recomputed when a new body is supplied.
    pub async fn update_by_slug(&self, slug: &str, data: MemberMerge) -> RepoResult<MemberExpanded> {
        if !self.slug_exists(slug).await? {
            return Err(RepoError::NotFound(format!("Member '{slug}' not found")));
        }

        #[derive(Serialize)]
        struct MemberMergeDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            cname: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            contact: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            mobile: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            address: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            email: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            location: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            body: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            excerpt: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            desc: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            categories: Option<Vec<Thing>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            tags: Option<Vec<Thing>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            photo: Option<Photo>,
            updated_at: Datetime,
        }

        let merge = MemberMergeDb {
            excerpt: data.body.as_deref().map(excerpt_of),
            desc: data.body.as_deref().map(desc_of),
            cname: data.cname,
            contact: data.contact,
            mobile: data.mobile,
            address: data.address,
            email: data.email,
            location: data.location,
            body: data.body,
            categories: data.categories,
            tags: data.tags,
            photo: data.photo,
            updated_at: Datetime::from(Utc::now()),
        };

        self.base
            .db()
            .query("UPDATE member MERGE $data WHERE slug = $slug")
            .bind(("slug", slug.to_string()))
            .bind(("data", merge))
            .await?;

        self.find_by_slug_expanded(slug)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Member '{slug}' not found")))
    }

    /// Unconditional delete; succeeds whether or not a record existed.
    pub async fn delete_by_slug(&self, slug: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE member WHERE slug = $slug")
            .bind(("slug", slug.to_string()))
            .await?;
        Ok(())
    }

    pub async fn find_photo(&self, slug: &str) -> RepoResult<Option<Photo>> {
        let mut result = self
            .base
            .db()
            .query("SELECT photo FROM member WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug.to_string()))
            .await?;
        let rows: Vec<PhotoRow> = result.take(0)?;
        Ok(rows.into_iter().next().and_then(|r| r.photo))
    }

    /// Members sharing at least one category with the given member,
    /// excluding the member itself.
    pub async fn find_related(
        &self,
        exclude: Thing,
        categories: Vec<Thing>,
        limit: usize,
    ) -> RepoResult<Vec<MemberExpanded>> {
        let members: Vec<MemberExpanded> = self
            .base
            .db()
            .query(
                "SELECT * OMIT photo, body FROM member \
                 WHERE id != $exclude AND categories CONTAINSANY $categories \
                 LIMIT $limit FETCH categories, tags, posted_by",
            )
            .bind(("exclude", exclude))
            .bind(("categories", categories))
            .bind(("limit", limit))
            .await?
            .take(0)?;
        Ok(members)
    }

    /// Case-insensitive substring search across the text fields. The
    /// projection excludes `photo` and `body`.
    pub async fn search(&self, term: &str) -> RepoResult<Vec<MemberExpanded>> {
        let term = term.to_lowercase();
        let members: Vec<MemberExpanded> = self
            .base
            .db()
            .query(
                "SELECT * OMIT photo, body FROM member WHERE \
                 string::contains(string::lowercase(cname), $term) OR \
                 string::contains(string::lowercase(mobile), $term) OR \
                 string::contains(string::lowercase(contact), $term) OR \
                 string::contains(string::lowercase(body), $term) OR \
                 string::contains(string::lowercase(address), $term) OR \
                 string::contains(string::lowercase(location), $term) OR \
                 string::contains(string::lowercase(email), $term) \
                 FETCH categories, tags, posted_by",
            )
            .bind(("term", term))
            .await?
            .take(0)?;
        Ok(members)
    }

    /// All members posted by the given user, standard expansion
    pub async fn find_by_user(&self, user: Thing) -> RepoResult<Vec<MemberExpanded>> {
        let members: Vec<MemberExpanded> = self
            .base
            .db()
            .query(
                "SELECT * OMIT photo FROM member WHERE posted_by = $user \
                 ORDER BY created_at FETCH categories, tags, posted_by",
            )
            .bind(("user", user))
            .await?
            .take(0)?;
        Ok(members)
    }
}
