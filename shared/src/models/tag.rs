//! Tag Model

use serde::{Deserialize, Serialize};

/// Tag entity, also used as the projected reference inside a member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: Option<String>,
    pub name: String,
    pub slug: String,
}

/// Create tag payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCreate {
    pub name: String,
}
