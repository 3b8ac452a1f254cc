//! Database models
//!
//! Stored document shapes for the member directory. Record references are
//! native `Thing` values so `FETCH` and record-id comparisons work; the
//! expanded (`FETCH`ed) query shapes live next to the plain ones.

pub mod category;
pub mod member;
pub mod tag;
pub mod user;

// Re-exports
pub use category::Category;
pub use member::{Member, MemberExpanded, MemberMerge, NewMember, Photo};
pub use tag::Tag;
pub use user::User;
