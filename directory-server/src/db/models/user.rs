//! User Model
//!
//! Projection of the auth-service principal. The record is upserted from
//! JWT claims whenever the principal creates a member, so `posted_by`
//! expansion always resolves.

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub profile: Option<String>,
}
