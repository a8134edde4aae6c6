//! HTTP API
//!
//! - [`health`] - liveness and database check
//! - [`auth`] - login, logout, current principal
//! - [`specialists`] - specialist management
//! - [`venues`] - venue management
//! - [`users`] - administrator accounts
//! - [`rosters`] - weekly roster editing and queries
//! - [`public`] - unauthenticated read-only roster views

pub mod auth;
pub mod health;
pub mod logging;
pub mod public;
pub mod rosters;
pub mod specialists;
pub mod users;
pub mod venues;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::require_auth;
use crate::core::ServerState;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// All routes, without middleware or state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(specialists::router())
        .merge(venues::router())
        .merge(users::router())
        .merge(rosters::router())
        .merge(public::router())
}

/// Fully configured application, used by the server and by tests
pub fn build_app(state: ServerState) -> Router {
    let cors = cors_layer(state.config.cors_origin.as_deref());

    build_router()
        // Innermost so the principal set by require_auth is visible
        .layer(axum_middleware::from_fn(logging::logging_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Permissive without an origin; otherwise that origin only, with credentials
/// so the access token cookie is sent
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let Some(origin) = origin else {
        return CorsLayer::permissive();
    };
    match HeaderValue::from_str(origin) {
        Ok(value) => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(value))
            .allow_methods([
                http::Method::GET,
                http::Method::POST,
                http::Method::PUT,
                http::Method::DELETE,
                http::Method::OPTIONS,
            ])
            .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
            .allow_credentials(true),
        Err(e) => {
            tracing::warn!(origin, error = %e, "Invalid CORS_ORIGIN, falling back to permissive CORS");
            CorsLayer::permissive()
        }
    }
}
