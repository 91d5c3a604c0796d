//! Route definitions for the calibration workflow.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::calibration;
use crate::state::AppState;
use crate::ws;

/// Routes mounted at `/calibration`.
///
/// ```text
/// POST   /start             -> start_calibration
/// POST   /status            -> update_calibration_status
/// GET    /sessions/{id}     -> get_session
/// GET    /sessions/{id}/ws  -> session_feed (WebSocket)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/start", post(calibration::start_calibration))
        .route("/status", post(calibration::update_calibration_status))
        .route("/sessions/{id}", get(calibration::get_session))
        .route("/sessions/{id}/ws", get(ws::session_feed))
}
