//! Utility module - common helpers and types
//!
//! - [`AppError`] / [`AppResult`] - application error type and alias
//! - [`text`] - slug, excerpt and markup-stripping helpers
//! - [`logger`] - tracing setup

pub mod error;
pub mod logger;
pub mod text;

pub use error::{AppError, AppResult};
