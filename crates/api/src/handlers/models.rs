//! Handlers for the model catalog.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use vigia_db::repositories::ModelRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/models
///
/// List the catalog, recommended entries first.
pub async fn list_models(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let models = ModelRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: models }))
}
