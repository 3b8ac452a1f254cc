use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::email::Mailer;
use crate::utils::AppError;

/// Server state, one shared copy per application.
///
/// | Field | Type | Purpose |
/// |-------|------|---------|
/// | config | Config | Validated settings (immutable) |
/// | db | Surreal<Db> | Embedded database |
/// | jwt_service | Arc<JwtService> | Token validation |
/// | mailer | Mailer | SendGrid notifications |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub mailer: Mailer,
}

impl ServerState {
    /// Open the database and wire up all services.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db_service = DbService::new(&config.database_path).await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let mailer = Mailer::new(config);

        Ok(Self {
            config: config.clone(),
            db: db_service.db,
            jwt_service,
            mailer,
        })
    }
}
