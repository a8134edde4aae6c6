//! Authentication
//!
//! - [`JwtService`] - access token issue/validation
//! - [`CurrentUser`] - authenticated principal
//! - [`require_auth`] - middleware guarding the admin API
//! - [`password`] - argon2 hashing

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{ACCESS_TOKEN_COOKIE, require_auth};
