//! Category Model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

/// Category record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,
    pub name: String,
    pub slug: String,
}
