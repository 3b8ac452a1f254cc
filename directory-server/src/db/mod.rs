//! Database Module
//!
//! Embedded SurrealDB (RocksDB backend). Tables are schemaless; the only
//! schema statements are the unique slug indexes that back duplicate
//! detection.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

/// Database service, owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (creating if missing) the store at `db_path` and apply the
    /// index definitions.
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns("directory")
            .use_db("directory")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(
            "DEFINE INDEX IF NOT EXISTS member_slug ON TABLE member COLUMNS slug UNIQUE;
             DEFINE INDEX IF NOT EXISTS category_slug ON TABLE category COLUMNS slug UNIQUE;
             DEFINE INDEX IF NOT EXISTS tag_slug ON TABLE tag COLUMNS slug UNIQUE;",
        )
        .await
        .map_err(|e| AppError::database(format!("Failed to define indexes: {e}")))?;

        tracing::info!(path = db_path, "Database connection established");

        Ok(Self { db })
    }
}
