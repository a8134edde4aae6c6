//! Roster API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use http::StatusCode;
use serde::Deserialize;
use shared::models::{DayView, SheetEntry, WeekSubmission, WeekSummary, WeekView};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;
use crate::utils::time::parse_date_or_today;

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: Option<String>,
}

/// GET /api/rosters - one row per (specialist, week) with rostered days
pub async fn list_weeks(State(state): State<ServerState>) -> AppResult<Json<Vec<WeekSummary>>> {
    Ok(Json(state.roster.list_week_summaries().await?))
}

/// POST /api/rosters - reconcile a week for one specialist
pub async fn save_week(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<WeekSubmission>,
) -> AppResult<(StatusCode, Json<WeekView>)> {
    let specialist_id = payload.specialist_id;
    let week = state.roster.reconcile_week(payload).await?;

    tracing::info!(
        specialist_id,
        week_start = %week.week_start,
        by = %user.login,
        "Roster week saved"
    );
    Ok((StatusCode::CREATED, Json(week)))
}

/// GET /api/rosters/day?date=YYYY-MM-DD - every active specialist on that date
pub async fn day(
    State(state): State<ServerState>,
    Query(query): Query<DayQuery>,
) -> AppResult<Json<Vec<DayView>>> {
    let date = parse_date_or_today(query.date.as_deref())?;
    Ok(Json(state.roster.list_day(date).await?))
}

/// POST /api/rosters/day-sheet - reconcile days of several specialists at once
pub async fn save_day_sheet(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<Vec<SheetEntry>>,
) -> AppResult<(StatusCode, Json<Vec<DayView>>)> {
    let days = state.roster.reconcile_sheet(payload).await?;

    tracing::info!(saved = days.len(), by = %user.login, "Day sheet saved");
    Ok((StatusCode::CREATED, Json(days)))
}

/// GET /api/rosters/{id} - the week containing day record `id`
pub async fn get_week(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<WeekView>> {
    Ok(Json(state.roster.get_week(id).await?))
}

/// DELETE /api/rosters/{id} - delete every day of that specialist's week
pub async fn delete_week(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let removed = state.roster.delete_week(id).await?;

    tracing::info!(anchor_id = id, removed, by = %user.login, "Roster week deleted");
    Ok(StatusCode::NO_CONTENT)
}
