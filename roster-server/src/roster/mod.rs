//! Weekly roster engine
//!
//! - [`week`] - week boundary calculation
//! - [`reconciler`] - merges submitted days into stored day records
//! - [`query`] - week summaries, daily grid, week fetch and delete
//! - [`render`] - joins venue display attributes onto slots
//!
//! [`RosterService`] ties these to a pool and the configured week start.

pub mod query;
pub mod reconciler;
pub mod render;
pub mod week;

use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DayInput, DayView, SheetEntry, WeekSubmission, WeekSummary, WeekView};
use sqlx::SqlitePool;

use crate::db::repository::specialist;
use query::db_error;
pub use week::{WeekStart, week_bounds};

/// Roster operations bound to a database pool
#[derive(Clone)]
pub struct RosterService {
    pool: SqlitePool,
    week_start: WeekStart,
}

impl RosterService {
    pub fn new(pool: SqlitePool, week_start: WeekStart) -> Self {
        Self { pool, week_start }
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Merge a week of days for one specialist in a single transaction.
    ///
    /// All days must fall in the same week. The returned view lists the days
    /// of the submission that remain persisted, ordered by date.
    pub async fn reconcile_week(&self, submission: WeekSubmission) -> AppResult<WeekView> {
        let WeekSubmission {
            specialist_id,
            mut days,
        } = submission;

        let first = days
            .first()
            .map(|d| d.date)
            .ok_or_else(|| AppError::new(ErrorCode::EmptySubmission))?;
        let (start, end) = self.week_start.bounds(first);
        if let Some(outside) = days.iter().find(|d| d.date < start || d.date > end) {
            return Err(AppError::new(ErrorCode::DayOutsideWeek)
                .with_detail("date", outside.date.to_string())
                .with_detail("week_start", start.to_string()));
        }
        days.sort_by_key(|d| d.date);

        let entries: Vec<(i64, DayInput)> = days.into_iter().map(|d| (specialist_id, d)).collect();

        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let saved = reconciler::reconcile_days(&mut *tx, &entries).await?;
        let specialist = specialist::find_by_id(&mut *tx, specialist_id).await?;
        tx.commit().await.map_err(db_error)?;

        tracing::info!(
            specialist_id,
            week_start = %start,
            submitted = entries.len(),
            persisted = saved.len(),
            "Reconciled roster week"
        );

        Ok(WeekView {
            specialist_id,
            specialist_name: specialist.as_ref().map(|s| s.name.clone()),
            specialist_code: specialist.map(|s| s.code),
            week_start: start,
            week_end: end,
            days: saved,
        })
    }

    /// Merge day-sheet entries (any specialists, any dates) in a single transaction
    pub async fn reconcile_sheet(&self, entries: Vec<SheetEntry>) -> AppResult<Vec<DayView>> {
        let entries: Vec<(i64, DayInput)> = entries
            .into_iter()
            .map(|e| (e.specialist_id, e.day))
            .collect();

        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let saved = reconciler::reconcile_days(&mut *tx, &entries).await?;
        tx.commit().await.map_err(db_error)?;

        tracing::info!(
            submitted = entries.len(),
            persisted = saved.len(),
            "Reconciled day sheet"
        );
        Ok(saved)
    }

    pub async fn list_week_summaries(&self) -> AppResult<Vec<WeekSummary>> {
        query::list_week_summaries(&self.pool, self.week_start).await
    }

    pub async fn list_day(&self, date: NaiveDate) -> AppResult<Vec<DayView>> {
        query::list_day(&self.pool, date).await
    }

    pub async fn get_week(&self, anchor_id: i64) -> AppResult<WeekView> {
        query::get_week(&self.pool, anchor_id, self.week_start).await
    }

    pub async fn delete_week(&self, anchor_id: i64) -> AppResult<u64> {
        query::delete_week(&self.pool, anchor_id, self.week_start).await
    }

    pub async fn specialist_week(&self, specialist_id: i64, date: NaiveDate) -> AppResult<WeekView> {
        query::specialist_week(&self.pool, specialist_id, date, self.week_start).await
    }
}
