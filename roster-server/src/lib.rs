//! Roster Server - on-call specialist roster backend
//!
//! # Architecture
//!
//! - **Roster engine** (`roster`): week bounds, reconciliation of submitted
//!   weeks against stored day records, roster queries
//! - **Database** (`db`): SQLite via sqlx, function-style repositories
//! - **Auth** (`auth`): JWT + Argon2
//! - **HTTP API** (`api`): axum routes for the admin editor and public views
//!
//! # Layout
//!
//! ```text
//! roster-server/src/
//! ├── core/     # config, state, server
//! ├── auth/     # JWT, password hashing, middleware
//! ├── api/      # HTTP routes and handlers
//! ├── roster/   # roster engine
//! ├── db/       # pool, migrations, repositories
//! └── utils/    # logging, validation, date parsing
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod roster;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use roster::{RosterService, WeekStart};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::init_logger_with_file;

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
