//! Route definitions for the model catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::models;
use crate::state::AppState;

/// Routes mounted at `/models`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(models::list_models))
}
