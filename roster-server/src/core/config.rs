use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};
use crate::roster::WeekStart;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_URL | sqlite:roster.db | SQLite database |
/// | HTTP_PORT | 8080 | HTTP port |
/// | ENVIRONMENT | development | development / staging / production |
/// | JWT_SECRET | dev fallback | HS256 secret, required outside development |
/// | JWT_EXPIRATION_MINUTES | 120 | token lifetime |
/// | JWT_ISSUER | roster-server | issuer claim |
/// | ROSTER_WEEK_START | monday | first day of the roster week |
/// | ADMIN_LOGIN | admin | bootstrap administrator login |
/// | ADMIN_PASSWORD | dev fallback | bootstrap administrator password |
/// | CORS_ORIGIN | unset | allowed origin; permissive when unset |
/// | LOG_LEVEL | info | default level when RUST_LOG is unset |
/// | LOG_DIR | unset | directory for daily rolling log files |
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub jwt: JwtConfig,
    pub week_start: WeekStart,
    /// Login of the bootstrap administrator; this account cannot be renamed or deleted
    pub admin_login: String,
    pub admin_password: String,
    pub cors_origin: Option<String>,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Require a secret env var: must be set and non-empty outside development.
    fn require_secret(name: &str, environment: &str) -> Result<String> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(ServerError::Config(format!(
                        "{name} must be set in {environment} environment"
                    )));
                }
                tracing::warn!("{name} not set, using development fallback");
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(ServerError::Config(format!(
                "{name} must not be empty in {environment} environment"
            )));
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let week_start = match std::env::var("ROSTER_WEEK_START") {
            Ok(raw) => raw.parse::<WeekStart>().map_err(ServerError::Config)?,
            Err(_) => WeekStart::default(),
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:roster.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt: JwtConfig {
                secret: Self::require_secret("JWT_SECRET", &environment)?,
                expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
                issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "roster-server".into()),
            },
            week_start,
            admin_login: std::env::var("ADMIN_LOGIN")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "admin".into()),
            admin_password: Self::require_secret("ADMIN_PASSWORD", &environment)?,
            cors_origin: std::env::var("CORS_ORIGIN").ok().filter(|s| !s.is_empty()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            environment,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
