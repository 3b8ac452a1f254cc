//! Member Model
//!
//! API-facing view of a member record. `categories`, `tags` and `postedBy`
//! carry the expanded reference projections, not raw ids. `body` and
//! `photo` are omitted from list/search projections, so `body` is optional
//! here; photo bytes are never embedded in JSON (served by the photo
//! route).

use serde::{Deserialize, Serialize};

use super::{Category, Tag, UserRef};

/// Member entity as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Option<String>,
    pub cname: String,
    pub contact: String,
    pub mobile: String,
    pub address: String,
    pub email: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    pub slug: String,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub posted_by: Option<UserRef>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Combined page response: one round trip for a listing page that also
/// needs the filter-sidebar data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembersPage {
    pub members: Vec<Member>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub size: usize,
}

/// Body of the paginated combined listing request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageParams {
    pub limit: Option<usize>,
    pub skip: Option<usize>,
}

/// Body of the related-members request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedParams {
    pub member: RelatedMember,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedMember {
    pub id: String,
    pub categories: Vec<String>,
}
