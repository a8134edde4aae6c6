//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State, response::IntoResponse};
use http::{StatusCode, header::SET_COOKIE};
use shared::models::{LoginRequest, LoginResponse, UserInfo};

use crate::auth::password::verify_password;
use crate::auth::{ACCESS_TOKEN_COOKIE, CurrentUser};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::security_log;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Fixed delay before answering a login attempt
const AUTH_FIXED_DELAY_MS: u64 = 200;

/// POST /api/auth/login - verify credentials and issue an access token
///
/// The token is returned in the body and as an HttpOnly `accessToken` cookie.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let login = req.login.trim().to_string();
    let found = user::find_by_login(&state.db.pool, &login).await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Same error for unknown login and wrong password
    let account = match found {
        Some(u) if verify_password(&req.password, &u.password_hash) => u,
        Some(_) => {
            security_log!("WARN", "login_failed", login = login.clone(), reason = "invalid_password");
            return Err(AppError::invalid_credentials());
        }
        None => {
            security_log!("WARN", "login_failed", login = login.clone(), reason = "unknown_login");
            return Err(AppError::invalid_credentials());
        }
    };

    if !account.is_active {
        security_log!("WARN", "login_disabled", login = login.clone());
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let token = state
        .jwt
        .generate_token(account.id, &account.name, &account.login)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(user_id = account.id, login = %account.login, "User logged in");

    let cookie = session_cookie(&token, state.jwt.lifetime_seconds(), state.config.is_production());
    Ok((
        [(SET_COOKIE, cookie)],
        Json(LoginResponse {
            name: account.name,
            token,
        }),
    ))
}

/// GET /api/auth/me - the authenticated principal
pub async fn me(user: CurrentUser) -> Json<UserInfo> {
    Json(UserInfo {
        id: user.id,
        name: user.name,
        login: user.login,
    })
}

/// POST /api/auth/logout - clear the access token cookie
pub async fn logout(State(state): State<ServerState>, user: CurrentUser) -> impl IntoResponse {
    tracing::info!(user_id = user.id, login = %user.login, "User logged out");
    (
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, session_cookie("", 0, state.config.is_production()))],
    )
}

fn session_cookie(token: &str, max_age: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{ACCESS_TOKEN_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
