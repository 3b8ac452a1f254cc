//! Repository Module
//!
//! CRUD operations over the embedded SurrealDB store.

pub mod category;
pub mod member;
pub mod tag;
pub mod user;

// Re-exports
pub use category::CategoryRepository;
pub use member::MemberRepository;
pub use tag::TagRepository;
pub use user::UserRepository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Database(msg) => AppError::Database(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Build a record id for `table`, accepting either a bare key or the
/// "table:key" form.
pub fn make_thing(table: &str, id: &str) -> Thing {
    let key = strip_table_prefix(table, id);
    Thing::from((table.to_string(), key.to_string()))
}

/// Strip a "table:" prefix from an id when present.
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_table_prefix_handles_both_forms() {
        assert_eq!(strip_table_prefix("member", "member:abc"), "abc");
        assert_eq!(strip_table_prefix("member", "abc"), "abc");
        // A different table's prefix is left alone
        assert_eq!(strip_table_prefix("member", "category:abc"), "category:abc");
    }

    #[test]
    fn make_thing_is_idempotent_on_prefixed_ids() {
        let a = make_thing("member", "abc");
        let b = make_thing("member", "member:abc");
        assert_eq!(a, b);
    }
}
