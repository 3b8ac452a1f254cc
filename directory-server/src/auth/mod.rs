//! Auth Module
//!
//! JWT validation and the admin gate for mutating routes:
//! - [`JwtService`] - token service
//! - [`CurrentUser`] - current user context
//! - [`require_auth`] - auth middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtError, JwtService};
pub use middleware::{require_auth, requires_admin};
