//! Venue Repository

use super::{RepoError, RepoResult};
use shared::models::{Venue, VenueCreate, VenueUpdate};
use sqlx::{Executor, Sqlite, SqlitePool};

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Venue>> {
    let rows = sqlx::query_as::<_, Venue>(
        "SELECT id, name, code, color, icon, is_active, created_at, updated_at FROM venue ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Venue>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, Venue>(
        "SELECT id, name, code, color, icon, is_active, created_at, updated_at FROM venue WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: VenueCreate) -> RepoResult<Venue> {
    let now = shared::util::now_millis();
    let row = sqlx::query_as::<_, Venue>(
        "INSERT INTO venue (name, code, color, icon, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) RETURNING id, name, code, color, icon, is_active, created_at, updated_at",
    )
    .bind(data.name.trim())
    .bind(normalize_code(data.code.as_deref()))
    .bind(data.color.as_deref().map(str::trim))
    .bind(data.icon)
    .bind(data.is_active.unwrap_or(true))
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Apply a partial update. A new color or icon replaces the appearance as a whole.
pub async fn update(pool: &SqlitePool, id: i64, data: VenueUpdate) -> RepoResult<Venue> {
    let current = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("venue {id}")))?;

    let (color, icon) = if data.color.is_some() || data.icon.is_some() {
        (data.color, data.icon)
    } else {
        (current.color, current.icon)
    };
    let code = match data.code {
        Some(code) => normalize_code(Some(&code)),
        None => current.code,
    };

    let now = shared::util::now_millis();
    let row = sqlx::query_as::<_, Venue>(
        "UPDATE venue SET name = ?1, code = ?2, color = ?3, icon = ?4, is_active = ?5, updated_at = ?6 WHERE id = ?7 RETURNING id, name, code, color, icon, is_active, created_at, updated_at",
    )
    .bind(data.name.as_deref().map(str::trim).unwrap_or(current.name.as_str()))
    .bind(code)
    .bind(color)
    .bind(icon)
    .bind(data.is_active.unwrap_or(current.is_active))
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.ok_or_else(|| RepoError::NotFound(format!("venue {id}")))
}

/// Delete a venue; fails with `InUse` while slots reference it
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM venue WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("venue {id}")));
    }
    Ok(())
}

/// Blank codes are stored as NULL so the UNIQUE index ignores them
fn normalize_code(code: Option<&str>) -> Option<String> {
    code.map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_uppercase)
}
