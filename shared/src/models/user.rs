//! User Model
//!
//! Projection of the auth-service user record, as embedded in member
//! responses (`postedBy`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRef {
    pub id: Option<String>,
    pub name: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}
