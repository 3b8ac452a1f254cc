//! User Repository
//!
//! The auth service owns user records; this repository only mirrors the
//! projection needed for `posted_by` expansion and username lookups.

use super::{BaseRepository, RepoResult, make_thing};
use crate::db::models::User;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE username = $username LIMIT 1")
            .bind(("username", username.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Upsert the principal's projection so reference expansion resolves.
    pub async fn upsert(&self, id: &str, name: &str, username: &str) -> RepoResult<Thing> {
        let thing = make_thing(TABLE, id);
        self.base
            .db()
            .query("UPSERT $user SET name = $name, username = $username")
            .bind(("user", thing.clone()))
            .bind(("name", name.to_string()))
            .bind(("username", username.to_string()))
            .await?;
        Ok(thing)
    }
}
