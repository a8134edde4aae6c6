//! Public API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::models::{DayView, Specialist, WeekView};

use crate::core::ServerState;
use crate::db::repository::specialist;
use crate::utils::AppResult;
use crate::utils::time::parse_date_or_today;

#[derive(Debug, Deserialize)]
pub struct SpecialistsQuery {
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    pub specialist_id: i64,
    pub date: Option<String>,
}

/// GET /api/public/specialists?active=true|false
pub async fn specialists(
    State(state): State<ServerState>,
    Query(query): Query<SpecialistsQuery>,
) -> AppResult<Json<Vec<Specialist>>> {
    let specialists = match query.active {
        Some(active) => specialist::find_by_active(&state.db.pool, active).await?,
        None => specialist::find_all(&state.db.pool).await?,
    };
    Ok(Json(specialists))
}

/// GET /api/public/roster/day?date=YYYY-MM-DD
pub async fn day(
    State(state): State<ServerState>,
    Query(query): Query<DayQuery>,
) -> AppResult<Json<Vec<DayView>>> {
    let date = parse_date_or_today(query.date.as_deref())?;
    Ok(Json(state.roster.list_day(date).await?))
}

/// GET /api/public/roster/week?specialist_id=..&date=YYYY-MM-DD
pub async fn week(
    State(state): State<ServerState>,
    Query(query): Query<WeekQuery>,
) -> AppResult<Json<WeekView>> {
    let date = parse_date_or_today(query.date.as_deref())?;
    Ok(Json(state.roster.specialist_week(query.specialist_id, date).await?))
}
