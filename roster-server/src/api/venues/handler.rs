//! Venue API Handlers
//!
//! A venue is displayed either by a color or by an icon, never both.

use axum::{
    Json,
    extract::{Path, State},
};
use http::StatusCode;
use shared::models::{Venue, VenueCreate, VenueUpdate};

use crate::core::ServerState;
use crate::db::repository::{RepoError, venue};
use crate::utils::validation::{
    MAX_ICON_BYTES, MAX_NAME_LEN, MAX_VENUE_CODE_LEN, validate_color, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

const RESOURCE: &str = "venue";

/// GET /api/venues
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Venue>>> {
    Ok(Json(venue::find_all(&state.db.pool).await?))
}

/// GET /api/venues/{id}
pub async fn get_by_id(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<Venue>> {
    let found = venue::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found_id(ErrorCode::VenueNotFound, id))?;
    Ok(Json(found))
}

/// POST /api/venues
pub async fn create(
    State(state): State<ServerState>,
    Json(mut payload): Json<VenueCreate>,
) -> AppResult<(StatusCode, Json<Venue>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.code, "code", MAX_VENUE_CODE_LEN)?;

    payload.color = blank_to_none(payload.color);
    match (&payload.color, &payload.icon) {
        (None, None) => return Err(AppError::new(ErrorCode::VenueAppearanceMissing)),
        (Some(_), Some(_)) => return Err(AppError::new(ErrorCode::VenueAppearanceConflict)),
        _ => validate_appearance(payload.color.as_deref(), payload.icon.as_deref())?,
    }

    let code = payload.code.clone().unwrap_or_default();
    let created = venue::create(&state.db.pool, payload)
        .await
        .map_err(|e| map_write_error(e, None, &code))?;

    tracing::info!(id = created.id, name = %created.name, "{RESOURCE} created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/venues/{id} - a new color or icon replaces the current appearance
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<VenueUpdate>,
) -> AppResult<Json<Venue>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.code, "code", MAX_VENUE_CODE_LEN)?;

    payload.color = blank_to_none(payload.color);
    if payload.color.is_some() && payload.icon.is_some() {
        return Err(AppError::new(ErrorCode::VenueAppearanceConflict));
    }
    validate_appearance(payload.color.as_deref(), payload.icon.as_deref())?;

    let code = payload.code.clone().unwrap_or_default();
    let updated = venue::update(&state.db.pool, id, payload)
        .await
        .map_err(|e| map_write_error(e, Some(id), &code))?;

    tracing::info!(id, "{RESOURCE} updated");
    Ok(Json(updated))
}

/// DELETE /api/venues/{id} - refused while any slot is worked at this venue
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    venue::delete(&state.db.pool, id)
        .await
        .map_err(|e| map_write_error(e, Some(id), ""))?;

    tracing::info!(id, "{RESOURCE} deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn validate_appearance(color: Option<&str>, icon: Option<&[u8]>) -> AppResult<()> {
    if let Some(color) = color {
        validate_color(color)?;
    }
    if let Some(icon) = icon
        && icon.len() > MAX_ICON_BYTES
    {
        return Err(AppError::validation(format!(
            "icon is too large ({} bytes, max {MAX_ICON_BYTES})",
            icon.len()
        )));
    }
    Ok(())
}

fn map_write_error(err: RepoError, id: Option<i64>, code: &str) -> AppError {
    match (err, id) {
        (RepoError::Duplicate(_), _) => {
            AppError::new(ErrorCode::VenueCodeExists).with_detail("code", code.trim().to_uppercase())
        }
        (RepoError::InUse(_), Some(id)) => AppError::new(ErrorCode::VenueInUse).with_detail("id", id),
        (RepoError::NotFound(_), Some(id)) => AppError::not_found_id(ErrorCode::VenueNotFound, id),
        (other, _) => other.into(),
    }
}
