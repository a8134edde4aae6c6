//! Slot Repository
//!
//! Slots belong to exactly one day record and are never re-parented.

use super::{RepoError, RepoResult};
use chrono::NaiveTime;
use shared::models::Slot;
use sqlx::{Executor, Sqlite};

/// Slots of a day record, ordered by time of day
pub async fn find_by_day_record<'e, E>(executor: E, day_record_id: i64) -> RepoResult<Vec<Slot>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, Slot>(
        "SELECT id, day_record_id, venue_id, time, created_at, updated_at FROM slot WHERE day_record_id = ? ORDER BY time, id",
    )
    .bind(day_record_id)
    .fetch_all(executor)
    .await?;
    Ok(rows)
}

pub async fn insert<'e, E>(
    executor: E,
    day_record_id: i64,
    venue_id: i64,
    time: NaiveTime,
) -> RepoResult<Slot>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = shared::util::now_millis();
    let row = sqlx::query_as::<_, Slot>(
        "INSERT INTO slot (day_record_id, venue_id, time, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4) RETURNING id, day_record_id, venue_id, time, created_at, updated_at",
    )
    .bind(day_record_id)
    .bind(venue_id)
    .bind(time)
    .bind(now)
    .fetch_one(executor)
    .await?;
    Ok(row)
}

/// Update venue and time in place, keeping the slot's identity
pub async fn update<'e, E>(executor: E, id: i64, venue_id: i64, time: NaiveTime) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE slot SET venue_id = ?, time = ?, updated_at = ? WHERE id = ?")
        .bind(venue_id)
        .bind(time)
        .bind(now)
        .bind(id)
        .execute(executor)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("slot {id}")));
    }
    Ok(())
}

pub async fn delete<'e, E>(executor: E, id: i64) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("DELETE FROM slot WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("slot {id}")));
    }
    Ok(())
}
