//! Day Record Repository

use super::{RepoError, RepoResult};
use chrono::NaiveDate;
use shared::models::DayRecord;
use sqlx::{Executor, Sqlite, SqlitePool};

/// Day record joined with its specialist's display fields
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DayRecordIndex {
    pub id: i64,
    pub specialist_id: i64,
    pub date: NaiveDate,
    pub specialist_name: String,
    pub specialist_code: String,
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<DayRecord>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, DayRecord>(
        "SELECT id, specialist_id, date, created_at, updated_at FROM day_record WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(row)
}

pub async fn find_by_specialist_and_date<'e, E>(
    executor: E,
    specialist_id: i64,
    date: NaiveDate,
) -> RepoResult<Option<DayRecord>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, DayRecord>(
        "SELECT id, specialist_id, date, created_at, updated_at FROM day_record WHERE specialist_id = ? AND date = ?",
    )
    .bind(specialist_id)
    .bind(date)
    .fetch_optional(executor)
    .await?;
    Ok(row)
}

/// Records of one specialist with `start <= date <= end`, ordered by date
pub async fn find_by_specialist_in_range<'e, E>(
    executor: E,
    specialist_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> RepoResult<Vec<DayRecord>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, DayRecord>(
        "SELECT id, specialist_id, date, created_at, updated_at FROM day_record WHERE specialist_id = ? AND date BETWEEN ? AND ? ORDER BY date",
    )
    .bind(specialist_id)
    .bind(start)
    .bind(end)
    .fetch_all(executor)
    .await?;
    Ok(rows)
}

pub async fn find_by_date<'e, E>(executor: E, date: NaiveDate) -> RepoResult<Vec<DayRecord>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, DayRecord>(
        "SELECT id, specialist_id, date, created_at, updated_at FROM day_record WHERE date = ?",
    )
    .bind(date)
    .fetch_all(executor)
    .await?;
    Ok(rows)
}

/// Every record with its specialist, newest date first
pub async fn find_index(pool: &SqlitePool) -> RepoResult<Vec<DayRecordIndex>> {
    let rows = sqlx::query_as::<_, DayRecordIndex>(
        "SELECT d.id, d.specialist_id, d.date, s.name AS specialist_name, s.code AS specialist_code FROM day_record d JOIN specialist s ON s.id = d.specialist_id ORDER BY d.date DESC, d.specialist_id, d.id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn insert<'e, E>(executor: E, specialist_id: i64, date: NaiveDate) -> RepoResult<DayRecord>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = shared::util::now_millis();
    let row = sqlx::query_as::<_, DayRecord>(
        "INSERT INTO day_record (specialist_id, date, created_at, updated_at) VALUES (?1, ?2, ?3, ?3) RETURNING id, specialist_id, date, created_at, updated_at",
    )
    .bind(specialist_id)
    .bind(date)
    .bind(now)
    .fetch_one(executor)
    .await?;
    Ok(row)
}

/// Bump `updated_at` after the record's slots changed
pub async fn touch<'e, E>(executor: E, id: i64) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE day_record SET updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(executor)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("day record {id}")));
    }
    Ok(())
}

/// Delete one record; its slots go with it (ON DELETE CASCADE)
pub async fn delete<'e, E>(executor: E, id: i64) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("DELETE FROM day_record WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("day record {id}")));
    }
    Ok(())
}

/// Delete a specialist's records in `[start, end]`; returns the number removed
pub async fn delete_by_specialist_in_range<'e, E>(
    executor: E,
    specialist_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("DELETE FROM day_record WHERE specialist_id = ? AND date BETWEEN ? AND ?")
        .bind(specialist_id)
        .bind(start)
        .bind(end)
        .execute(executor)
        .await?;
    Ok(rows.rows_affected())
}
