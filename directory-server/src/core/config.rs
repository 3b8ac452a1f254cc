//! Server Configuration
//!
//! All settings are read from the environment once at startup and
//! validated before anything else spins up.

use crate::utils::AppError;

/// JWT settings shared with the blog platform's auth service
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 secret (at least 32 bytes)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | PORT | 8000 | HTTP listen port |
/// | DATABASE_PATH | data/directory.db | Embedded database directory |
/// | ENVIRONMENT | development | development \| production |
/// | CLIENT_URL | http://localhost:3000 | Allowed CORS origin (development only) |
/// | APP_NAME | Member Directory | Name used in notification emails |
/// | JWT_SECRET | (required) | HS256 secret, min 32 chars |
/// | JWT_EXPIRATION_MINUTES | 1440 | Token lifetime |
/// | SENDGRID_API_KEY | (unset) | Mail delivery key; mail is skipped without it |
/// | EMAIL_TO | (unset) | Site inbox for contact notifications |
/// | EMAIL_FROM | noreply@memberdirectory.local | Sender address |
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub port: u16,
    /// Path of the embedded database
    pub database_path: String,
    /// development | production
    pub environment: String,
    /// Frontend origin, used for CORS in development
    pub client_url: String,
    /// Application name used in email subjects and bodies
    pub app_name: String,
    /// JWT settings
    pub jwt: JwtConfig,
    /// SendGrid API key; notifications are logged and skipped when unset
    pub sendgrid_api_key: Option<String>,
    /// Destination inbox for contact-form notifications
    pub email_to: Option<String>,
    /// Sender address on outgoing notifications
    pub email_from: String,
}

impl Config {
    /// Load and validate configuration from the environment.
    pub fn from_env() -> Result<Self, AppError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| AppError::internal(format!("Invalid PORT value: {raw}")))?,
            Err(_) => 8000,
        };

        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| AppError::internal("JWT_SECRET environment variable must be set"))?;
        if secret.len() < 32 {
            return Err(AppError::internal(
                "JWT_SECRET must be at least 32 characters long",
            ));
        }

        Ok(Self {
            port,
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/directory.db".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            client_url: std::env::var("CLIENT_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            app_name: std::env::var("APP_NAME").unwrap_or_else(|_| "Member Directory".into()),
            jwt: JwtConfig {
                secret,
                expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1440),
            },
            sendgrid_api_key: std::env::var("SENDGRID_API_KEY").ok(),
            email_to: std::env::var("EMAIL_TO").ok(),
            email_from: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "noreply@memberdirectory.local".into()),
        })
    }

    /// Build a config with explicit values, for tests.
    pub fn with_overrides(database_path: impl Into<String>, port: u16, jwt_secret: &str) -> Self {
        Self {
            port,
            database_path: database_path.into(),
            environment: "development".into(),
            client_url: "http://localhost:3000".into(),
            app_name: "Member Directory".into(),
            jwt: JwtConfig {
                secret: jwt_secret.to_string(),
                expiration_minutes: 60,
            },
            sendgrid_api_key: None,
            email_to: None,
            email_from: "noreply@memberdirectory.local".into(),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
