use std::sync::Arc;

use crate::auth::JwtService;
use crate::auth::password::hash_password;
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::db::repository::user::{self, NewUser};
use crate::roster::RosterService;

/// Services shared by every request handler
///
/// Cloning is cheap: the pool and the JWT keys are reference counted.
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | immutable configuration |
/// | db | SQLite pool |
/// | jwt | token issue/validation |
/// | roster | roster engine bound to the pool and week convention |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub jwt: Arc<JwtService>,
    pub roster: RosterService,
}

impl ServerState {
    /// Open the database, apply migrations and seed the administrator
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = if config.database_url.contains(":memory:") {
            DbService::in_memory().await?
        } else {
            DbService::new(&config.database_url).await?
        };

        let state = Self::with_db(config.clone(), db);
        state.ensure_admin().await?;
        Ok(state)
    }

    /// Build state around an already opened database
    pub fn with_db(config: Config, db: DbService) -> Self {
        let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));
        let roster = RosterService::new(db.pool.clone(), config.week_start);
        Self {
            config,
            db,
            jwt,
            roster,
        }
    }

    /// Create the bootstrap administrator when no user exists yet
    pub async fn ensure_admin(&self) -> Result<()> {
        if user::count(&self.db.pool).await? > 0 {
            return Ok(());
        }

        let hash = hash_password(&self.config.admin_password)
            .map_err(|e| ServerError::Config(format!("Failed to hash admin password: {e}")))?;
        let admin = user::create(
            &self.db.pool,
            NewUser {
                name: "Administrator",
                login: &self.config.admin_login,
                password_hash: &hash,
                is_active: true,
            },
        )
        .await?;

        tracing::info!(user_id = admin.id, login = %admin.login, "Bootstrap administrator created");
        Ok(())
    }

    pub fn is_admin_login(&self, login: &str) -> bool {
        login == self.config.admin_login
    }
}
