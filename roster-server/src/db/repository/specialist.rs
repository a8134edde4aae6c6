//! Specialist Repository

use super::{RepoError, RepoResult};
use shared::models::{Specialist, SpecialistCreate, SpecialistUpdate};
use sqlx::{Executor, Sqlite, SqlitePool};

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Specialist>> {
    let rows = sqlx::query_as::<_, Specialist>(
        "SELECT id, name, code, is_active, associated_on, created_at, updated_at FROM specialist ORDER BY associated_on, name",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Specialists with `is_active` matching the flag, in association order
pub async fn find_by_active<'e, E>(executor: E, active: bool) -> RepoResult<Vec<Specialist>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, Specialist>(
        "SELECT id, name, code, is_active, associated_on, created_at, updated_at FROM specialist WHERE is_active = ? ORDER BY associated_on, id",
    )
    .bind(active)
    .fetch_all(executor)
    .await?;
    Ok(rows)
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Specialist>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, Specialist>(
        "SELECT id, name, code, is_active, associated_on, created_at, updated_at FROM specialist WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: SpecialistCreate) -> RepoResult<Specialist> {
    let now = shared::util::now_millis();
    let associated_on = data.associated_on.unwrap_or_else(shared::util::today);
    let row = sqlx::query_as::<_, Specialist>(
        "INSERT INTO specialist (name, code, is_active, associated_on, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5) RETURNING id, name, code, is_active, associated_on, created_at, updated_at",
    )
    .bind(data.name.trim())
    .bind(data.code.trim().to_uppercase())
    .bind(data.is_active.unwrap_or(true))
    .bind(associated_on)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update(pool: &SqlitePool, id: i64, data: SpecialistUpdate) -> RepoResult<Specialist> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE specialist SET name = COALESCE(?1, name), code = COALESCE(?2, code), is_active = COALESCE(?3, is_active), associated_on = COALESCE(?4, associated_on), updated_at = ?5 WHERE id = ?6",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.code.as_deref().map(|c| c.trim().to_uppercase()))
    .bind(data.is_active)
    .bind(data.associated_on)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("specialist {id}")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("specialist {id}")))
}

/// Delete a specialist; fails with `InUse` while day records reference it
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM specialist WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("specialist {id}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;
    use chrono::NaiveDate;

    fn payload(name: &str, code: &str, on: (i32, u32, u32)) -> SpecialistCreate {
        SpecialistCreate {
            name: name.to_string(),
            code: code.to_string(),
            is_active: None,
            associated_on: NaiveDate::from_ymd_opt(on.0, on.1, on.2),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;
        let created = create(&pool, payload(" Ana Lima ", "al", (2020, 1, 1)))
            .await
            .unwrap();

        assert_eq!(created.name, "Ana Lima");
        assert_eq!(created.code, "AL");
        assert!(created.is_active);

        let found = find_by_id(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(found.associated_on, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_code() {
        let pool = test_pool().await;
        create(&pool, payload("Ana", "AL", (2020, 1, 1))).await.unwrap();
        let err = create(&pool, payload("Alberto", "al", (2021, 1, 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_active_ordering() {
        let pool = test_pool().await;
        let late = create(&pool, payload("Late", "LT", (2022, 5, 1))).await.unwrap();
        let early = create(&pool, payload("Early", "EA", (2019, 5, 1))).await.unwrap();
        let gone = create(&pool, payload("Gone", "GN", (2018, 5, 1))).await.unwrap();
        update(
            &pool,
            gone.id,
            SpecialistUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let active = find_by_active(&pool, true).await.unwrap();
        let ids: Vec<i64> = active.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![early.id, late.id]);

        let inactive = find_by_active(&pool, false).await.unwrap();
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].id, gone.id);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let pool = test_pool().await;
        let err = update(&pool, 99, SpecialistUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = test_pool().await;
        let s = create(&pool, payload("Ana", "AL", (2020, 1, 1))).await.unwrap();
        delete(&pool, s.id).await.unwrap();
        assert!(find_by_id(&pool, s.id).await.unwrap().is_none());
        assert!(matches!(
            delete(&pool, s.id).await.unwrap_err(),
            RepoError::NotFound(_)
        ));
    }
}
