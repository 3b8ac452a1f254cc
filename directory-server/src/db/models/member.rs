//! Member Model
//!
//! `Member` is the stored shape (references as record ids).
//! `MemberExpanded` mirrors it with references resolved by `FETCH`, for
//! the read paths that return populated categories/tags/postedBy.

use super::{Category, Tag, User};
use serde::{Deserialize, Serialize};
use surrealdb::sql::{Datetime, Thing};

/// Uploaded photo blob with its reported content type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Member record as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,
    pub cname: String,
    pub contact: String,
    pub mobile: String,
    pub address: String,
    pub email: String,
    pub location: String,
    pub body: String,
    pub excerpt: String,
    #[serde(default)]
    pub desc: Option<String>,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Photo>,
    #[serde(default)]
    pub categories: Vec<Thing>,
    #[serde(default)]
    pub tags: Vec<Thing>,
    #[serde(default)]
    pub posted_by: Option<Thing>,
    pub created_at: Datetime,
    pub updated_at: Datetime,
}

/// Member row with references resolved (`FETCH categories, tags,
/// posted_by`). `body` is absent in search projections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberExpanded {
    #[serde(default)]
    pub id: Option<Thing>,
    pub cname: String,
    pub contact: String,
    pub mobile: String,
    pub address: String,
    pub email: String,
    pub location: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    pub slug: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub posted_by: Option<User>,
    pub created_at: Datetime,
    pub updated_at: Datetime,
}

/// Validated input for a member create, references already resolved.
/// Slug, excerpt and timestamps are derived by the repository so the
/// record is built complete and persisted in one write.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub cname: String,
    pub contact: String,
    pub mobile: String,
    pub address: String,
    pub email: String,
    pub location: String,
    pub body: String,
    pub categories: Vec<Thing>,
    pub tags: Vec<Thing>,
    pub posted_by: Thing,
    pub photo: Option<Photo>,
}

/// Merge payload for a member update. `None` leaves the stored value
/// untouched; `slug` and `posted_by` are deliberately absent so a merge
/// can never overwrite them.
#[derive(Debug, Clone, Default)]
pub struct MemberMerge {
    pub cname: Option<String>,
    pub contact: Option<String>,
    pub mobile: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub body: Option<String>,
    pub categories: Option<Vec<Thing>>,
    pub tags: Option<Vec<Thing>>,
    pub photo: Option<Photo>,
}
