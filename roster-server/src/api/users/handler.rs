//! User API Handlers
//!
//! The bootstrap administrator (login from `ADMIN_LOGIN`) can change its
//! name and password but can't be renamed, disabled or deleted.

use axum::{
    Json,
    extract::{Path, State},
};
use http::StatusCode;
use shared::models::{User, UserCreate, UserUpdate};

use crate::auth::password::hash_password;
use crate::core::ServerState;
use crate::db::repository::user::{self, NewUser, UserPatch};
use crate::db::repository::RepoError;
use crate::security_log;
use crate::utils::validation::{
    MAX_LOGIN_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

const RESOURCE: &str = "user";

/// GET /api/users
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(user::find_all(&state.db.pool).await?))
}

/// GET /api/users/{id}
pub async fn get_by_id(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<User>> {
    let found = user::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found_id(ErrorCode::UserNotFound, id))?;
    Ok(Json(found))
}

/// POST /api/users - password is required
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<(StatusCode, Json<User>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.login, "login", MAX_LOGIN_LEN)?;
    let password = non_blank(payload.password.as_deref())
        .ok_or_else(|| AppError::new(ErrorCode::PasswordRequired))?;
    validate_password(password)?;

    let hash = hash_password(password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
    let login = payload.login.trim();
    let created = user::create(
        &state.db.pool,
        NewUser {
            name: payload.name.trim(),
            login,
            password_hash: &hash,
            is_active: payload.is_active.unwrap_or(true),
        },
    )
    .await
    .map_err(|e| map_write_error(e, None, login))?;

    tracing::info!(id = created.id, login = %created.login, "{RESOURCE} created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/users/{id} - a blank or missing password leaves it unchanged
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<User>> {
    let current = user::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found_id(ErrorCode::UserNotFound, id))?;

    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(login) = &payload.login {
        validate_required_text(login, "login", MAX_LOGIN_LEN)?;
    }

    if state.is_admin_login(&current.login) {
        let renamed = payload
            .login
            .as_deref()
            .is_some_and(|l| l.trim() != current.login);
        let disabled = payload.is_active == Some(false);
        if renamed || disabled {
            security_log!("WARN", "admin_modify_refused", user_id = id);
            return Err(AppError::new(ErrorCode::CannotModifyAdmin));
        }
    }

    let hash = match non_blank(payload.password.as_deref()) {
        Some(password) => {
            validate_password(password)?;
            Some(
                hash_password(password)
                    .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?,
            )
        }
        None => None,
    };

    let login = payload.login.as_deref().map(str::trim);
    let updated = user::update(
        &state.db.pool,
        id,
        UserPatch {
            name: payload.name.as_deref().map(str::trim),
            login,
            password_hash: hash.as_deref(),
            is_active: payload.is_active,
        },
    )
    .await
    .map_err(|e| map_write_error(e, Some(id), login.unwrap_or_default()))?;

    tracing::info!(id, "{RESOURCE} updated");
    Ok(Json(updated))
}

/// DELETE /api/users/{id} - the bootstrap administrator can't be deleted
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    let current = user::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found_id(ErrorCode::UserNotFound, id))?;

    if state.is_admin_login(&current.login) {
        security_log!("WARN", "admin_delete_refused", user_id = id);
        return Err(AppError::new(ErrorCode::CannotDeleteAdmin));
    }

    user::delete(&state.db.pool, id)
        .await
        .map_err(|e| map_write_error(e, Some(id), ""))?;

    tracing::info!(id, "{RESOURCE} deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn validate_password(password: &str) -> AppResult<()> {
    if password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password is too long (max {MAX_PASSWORD_LEN})"
        )));
    }
    Ok(())
}

fn map_write_error(err: RepoError, id: Option<i64>, login: &str) -> AppError {
    match (err, id) {
        (RepoError::Duplicate(_), _) => {
            AppError::new(ErrorCode::UserLoginExists).with_detail("login", login)
        }
        (RepoError::NotFound(_), Some(id)) => AppError::not_found_id(ErrorCode::UserNotFound, id),
        (other, _) => other.into(),
    }
}
