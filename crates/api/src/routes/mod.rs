pub mod calibration;
pub mod health;
pub mod models;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /models                               model catalog, recommended first
///
/// /calibration/start                    trigger a calibration run (POST)
/// /calibration/status                   partial status update (POST)
/// /calibration/sessions/{id}            session lookup
/// /calibration/sessions/{id}/ws         per-session change feed (WebSocket)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/models", models::router())
        .nest("/calibration", calibration::router())
}
