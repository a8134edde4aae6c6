//! Read-side roster queries

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DayView, Specialist, WeekSummary, WeekView};
use sqlx::{SqliteConnection, SqlitePool};

use super::render::{VenueCache, load_day_view};
use super::week::WeekStart;
use crate::db::repository::{day_record, specialist};

/// One row per (specialist, week) holding at least one record
pub async fn list_week_summaries(
    pool: &SqlitePool,
    week_start: WeekStart,
) -> AppResult<Vec<WeekSummary>> {
    let index = day_record::find_index(pool).await?;

    let mut weeks: BTreeMap<(i64, NaiveDate), WeekSummary> = BTreeMap::new();
    for row in index {
        let (start, end) = week_start.bounds(row.date);
        weeks
            .entry((row.specialist_id, start))
            .and_modify(|summary| summary.id = summary.id.min(row.id))
            .or_insert_with(|| WeekSummary {
                id: row.id,
                specialist_id: row.specialist_id,
                specialist_name: row.specialist_name.clone(),
                specialist_code: row.specialist_code.clone(),
                week_start: start,
                week_end: end,
            });
    }

    let mut summaries: Vec<WeekSummary> = weeks.into_values().collect();
    summaries.sort_by(|a, b| {
        b.week_start
            .cmp(&a.week_start)
            .then_with(|| a.specialist_name.cmp(&b.specialist_name))
            .then_with(|| a.specialist_id.cmp(&b.specialist_id))
    });
    Ok(summaries)
}

/// Every active specialist's day on `date`; placeholders where nothing is rostered
pub async fn list_day(pool: &SqlitePool, date: NaiveDate) -> AppResult<Vec<DayView>> {
    let mut conn = pool.acquire().await.map_err(db_error)?;

    let specialists = specialist::find_by_active(&mut *conn, true).await?;
    let mut records: HashMap<i64, _> = day_record::find_by_date(&mut *conn, date)
        .await?
        .into_iter()
        .map(|r| (r.specialist_id, r))
        .collect();

    let mut cache = VenueCache::new();
    let mut days = Vec::with_capacity(specialists.len());
    for s in specialists {
        match records.remove(&s.id) {
            Some(record) => {
                days.push(load_day_view(&mut *conn, &record, Some(s.code), &mut cache).await?)
            }
            None => days.push(DayView::placeholder(s.id, Some(s.code), date)),
        }
    }
    Ok(days)
}

/// The week of the anchor record's specialist that contains the anchor's date
pub async fn get_week(pool: &SqlitePool, anchor_id: i64, week_start: WeekStart) -> AppResult<WeekView> {
    let mut conn = pool.acquire().await.map_err(db_error)?;

    let anchor = day_record::find_by_id(&mut *conn, anchor_id)
        .await?
        .ok_or_else(|| AppError::not_found_id(ErrorCode::DayRecordNotFound, anchor_id))?;
    let specialist = specialist::find_by_id(&mut *conn, anchor.specialist_id).await?;

    week_view(&mut *conn, anchor.specialist_id, specialist, anchor.date, week_start).await
}

/// The week of `specialist_id` that contains `date` (may have no days)
pub async fn specialist_week(
    pool: &SqlitePool,
    specialist_id: i64,
    date: NaiveDate,
    week_start: WeekStart,
) -> AppResult<WeekView> {
    let mut conn = pool.acquire().await.map_err(db_error)?;

    let specialist = specialist::find_by_id(&mut *conn, specialist_id)
        .await?
        .ok_or_else(|| AppError::not_found_id(ErrorCode::SpecialistNotFound, specialist_id))?;

    week_view(&mut *conn, specialist_id, Some(specialist), date, week_start).await
}

/// Delete every record in the anchor's week for its specialist; returns the count removed
pub async fn delete_week(pool: &SqlitePool, anchor_id: i64, week_start: WeekStart) -> AppResult<u64> {
    let mut tx = pool.begin().await.map_err(db_error)?;

    let anchor = day_record::find_by_id(&mut *tx, anchor_id)
        .await?
        .ok_or_else(|| AppError::not_found_id(ErrorCode::DayRecordNotFound, anchor_id))?;
    let (start, end) = week_start.bounds(anchor.date);
    let removed =
        day_record::delete_by_specialist_in_range(&mut *tx, anchor.specialist_id, start, end).await?;

    tx.commit().await.map_err(db_error)?;

    tracing::info!(
        anchor_id,
        specialist_id = anchor.specialist_id,
        week_start = %start,
        removed,
        "Deleted roster week"
    );
    Ok(removed)
}

pub(crate) async fn week_view(
    conn: &mut SqliteConnection,
    specialist_id: i64,
    specialist: Option<Specialist>,
    date: NaiveDate,
    week_start: WeekStart,
) -> AppResult<WeekView> {
    let (start, end) = week_start.bounds(date);
    let records =
        day_record::find_by_specialist_in_range(&mut *conn, specialist_id, start, end).await?;

    let code = specialist.as_ref().map(|s| s.code.clone());
    let mut cache = VenueCache::new();
    let mut days = Vec::with_capacity(records.len());
    for record in &records {
        days.push(load_day_view(conn, record, code.clone(), &mut cache).await?);
    }

    Ok(WeekView {
        specialist_id,
        specialist_name: specialist.as_ref().map(|s| s.name.clone()),
        specialist_code: code,
        week_start: start,
        week_end: end,
        days,
    })
}

pub(crate) fn db_error(err: sqlx::Error) -> AppError {
    crate::db::repository::RepoError::from(err).into()
}
