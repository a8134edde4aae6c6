//! Roster API
//!
//! | Path | Method | Meaning |
//! |------|--------|---------|
//! | /api/rosters | GET | week summaries |
//! | /api/rosters | POST | reconcile one specialist's week |
//! | /api/rosters/day | GET | daily grid (`?date=`) |
//! | /api/rosters/day-sheet | POST | reconcile a multi-specialist day sheet |
//! | /api/rosters/{id} | GET | week containing day record `id` |
//! | /api/rosters/{id} | DELETE | delete that week |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/rosters", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_weeks).post(handler::save_week))
        .route("/day", get(handler::day))
        .route("/day-sheet", post(handler::save_day_sheet))
        .route("/{id}", get(handler::get_week).delete(handler::delete_week))
}
