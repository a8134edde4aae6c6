//! Public read-only API (no authentication)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/public", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/specialists", get(handler::specialists))
        .route("/roster/day", get(handler::day))
        .route("/roster/week", get(handler::week))
}
