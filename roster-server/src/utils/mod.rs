//! Utilities
//!
//! Logging setup, input validation and request parameter parsing.

pub mod logger;
pub mod time;
pub mod validation;

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
