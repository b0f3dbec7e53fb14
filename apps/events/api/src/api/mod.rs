//! API routes module
//!
//! All routes here are nested under `/api` by `axum_helpers::create_router`.

pub mod events;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/v3/app/events", events::router(state))
}
