//! User Repository
//!
//! Stores password hashes only; hashing happens in `auth::password`.

use super::{RepoError, RepoResult};
use shared::models::User;
use sqlx::SqlitePool;

/// Fields for a new user row
pub struct NewUser<'a> {
    pub name: &'a str,
    pub login: &'a str,
    pub password_hash: &'a str,
    pub is_active: bool,
}

/// Partial update; `None` leaves the column unchanged
#[derive(Default)]
pub struct UserPatch<'a> {
    pub name: Option<&'a str>,
    pub login: Option<&'a str>,
    pub password_hash: Option<&'a str>,
    pub is_active: Option<bool>,
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<User>> {
    let rows = sqlx::query_as::<_, User>(
        "SELECT id, name, login, password_hash, is_active, created_at, updated_at FROM app_user ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let row = sqlx::query_as::<_, User>(
        "SELECT id, name, login, password_hash, is_active, created_at, updated_at FROM app_user WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_by_login(pool: &SqlitePool, login: &str) -> RepoResult<Option<User>> {
    let row = sqlx::query_as::<_, User>(
        "SELECT id, name, login, password_hash, is_active, created_at, updated_at FROM app_user WHERE login = ?",
    )
    .bind(login)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM app_user")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create(pool: &SqlitePool, user: NewUser<'_>) -> RepoResult<User> {
    let now = shared::util::now_millis();
    let row = sqlx::query_as::<_, User>(
        "INSERT INTO app_user (name, login, password_hash, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5) RETURNING id, name, login, password_hash, is_active, created_at, updated_at",
    )
    .bind(user.name)
    .bind(user.login)
    .bind(user.password_hash)
    .bind(user.is_active)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update(pool: &SqlitePool, id: i64, patch: UserPatch<'_>) -> RepoResult<User> {
    let now = shared::util::now_millis();
    let row = sqlx::query_as::<_, User>(
        "UPDATE app_user SET name = COALESCE(?1, name), login = COALESCE(?2, login), password_hash = COALESCE(?3, password_hash), is_active = COALESCE(?4, is_active), updated_at = ?5 WHERE id = ?6 RETURNING id, name, login, password_hash, is_active, created_at, updated_at",
    )
    .bind(patch.name)
    .bind(patch.login)
    .bind(patch.password_hash)
    .bind(patch.is_active)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.ok_or_else(|| RepoError::NotFound(format!("user {id}")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM app_user WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("user {id}")));
    }
    Ok(())
}
