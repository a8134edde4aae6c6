//! Data models
//!
//! Shared between roster-server and the admin frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod roster;
pub mod specialist;
pub mod user;
pub mod venue;

// Re-exports
pub use roster::*;
pub use specialist::*;
pub use user::*;
pub use venue::*;
