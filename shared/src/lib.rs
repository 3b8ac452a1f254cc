//! Shared types for the member directory backend
//!
//! API-facing response and request models, serialized the way the HTTP
//! clients expect them (camelCase field names, string record ids).

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};
