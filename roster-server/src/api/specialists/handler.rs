//! Specialist API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use http::StatusCode;
use serde::Deserialize;
use shared::models::{Specialist, SpecialistCreate, SpecialistUpdate};

use crate::core::ServerState;
use crate::db::repository::{RepoError, specialist};
use crate::utils::validation::{MAX_NAME_LEN, MAX_SPECIALIST_CODE_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

const RESOURCE: &str = "specialist";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub active: Option<bool>,
}

/// GET /api/specialists - all specialists, or only active/inactive ones with `?active=`
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Specialist>>> {
    let specialists = match query.active {
        Some(active) => specialist::find_by_active(&state.db.pool, active).await?,
        None => specialist::find_all(&state.db.pool).await?,
    };
    Ok(Json(specialists))
}

/// GET /api/specialists/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Specialist>> {
    let found = specialist::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found_id(ErrorCode::SpecialistNotFound, id))?;
    Ok(Json(found))
}

/// POST /api/specialists
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SpecialistCreate>,
) -> AppResult<(StatusCode, Json<Specialist>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.code, "code", MAX_SPECIALIST_CODE_LEN)?;

    let code = payload.code.trim().to_uppercase();
    let created = specialist::create(&state.db.pool, payload)
        .await
        .map_err(|e| map_write_error(e, None, &code))?;

    tracing::info!(id = created.id, code = %created.code, "{RESOURCE} created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/specialists/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SpecialistUpdate>,
) -> AppResult<Json<Specialist>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(code) = &payload.code {
        validate_required_text(code, "code", MAX_SPECIALIST_CODE_LEN)?;
    }

    let code = payload
        .code
        .as_deref()
        .map(|c| c.trim().to_uppercase())
        .unwrap_or_default();
    let updated = specialist::update(&state.db.pool, id, payload)
        .await
        .map_err(|e| map_write_error(e, Some(id), &code))?;

    tracing::info!(id, "{RESOURCE} updated");
    Ok(Json(updated))
}

/// DELETE /api/specialists/{id} - refused while the specialist has roster days
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    specialist::delete(&state.db.pool, id)
        .await
        .map_err(|e| map_write_error(e, Some(id), ""))?;

    tracing::info!(id, "{RESOURCE} deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn map_write_error(err: RepoError, id: Option<i64>, code: &str) -> AppError {
    match (err, id) {
        (RepoError::Duplicate(_), _) => {
            AppError::new(ErrorCode::SpecialistCodeExists).with_detail("code", code)
        }
        (RepoError::InUse(_), Some(id)) => AppError::new(ErrorCode::SpecialistInUse).with_detail("id", id),
        (RepoError::NotFound(_), Some(id)) => AppError::not_found_id(ErrorCode::SpecialistNotFound, id),
        (other, _) => other.into(),
    }
}
