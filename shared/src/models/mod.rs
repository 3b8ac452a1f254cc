//! Data models
//!
//! Shared between directory-server and its frontend (via API).
//! All record ids are strings in `table:id` form.

pub mod category;
pub mod member;
pub mod tag;
pub mod user;

// Re-exports
pub use category::*;
pub use member::*;
pub use tag::*;
pub use user::*;
