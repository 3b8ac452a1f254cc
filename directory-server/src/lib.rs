//! Member Directory Server
//!
//! Backend for the blog platform's member directory: member CRUD with
//! photo upload, category/tag references, substring search and contact
//! notifications.
//!
//! # Module structure
//!
//! ```text
//! directory-server/src/
//! ├── core/          # config, state, server lifecycle
//! ├── auth/          # JWT validation, admin gate
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # embedded SurrealDB models and repositories
//! ├── email/         # SendGrid notification delivery
//! └── utils/         # errors, logging, text derivations
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod email;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, JwtConfig, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_level};
