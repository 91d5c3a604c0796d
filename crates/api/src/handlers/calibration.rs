//! Handlers for the calibration workflow: the trigger endpoint, the
//! status-update endpoint, and session lookup.
//!
//! The trigger drives a session `pending` -> `running` -> terminal around
//! one synchronous call to the caller-supplied notebook endpoint. The
//! three writes are deliberately not wrapped in a transaction, so readers
//! can observe intermediate states; a crash between writes leaves a stuck
//! `pending`/`running` session that nothing reaps.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use vigia_core::error::CoreError;
use vigia_core::types::DbId;
use vigia_db::models::calibration_session::{
    CalibrationSession, StartCalibration, UpdateCalibrationStatus,
};
use vigia_db::repositories::CalibrationSessionRepo;
use vigia_events::SessionUpdate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

/// Body of a successful `POST /calibration/start`.
#[derive(Debug, Serialize)]
pub struct StartCalibrationResponse {
    pub success: bool,
    #[serde(rename = "sessionId")]
    pub session_id: DbId,
    /// The notebook endpoint's JSON response, verbatim.
    pub data: serde_json::Value,
}

/// Body of a successful `POST /calibration/status`.
#[derive(Debug, Serialize)]
pub struct UpdateStatusResponse {
    pub success: bool,
    pub session: CalibrationSession,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validation(message: &str) -> AppError {
    AppError::Core(CoreError::Validation(message.to_string()))
}

/// Extract a required, non-empty field or fail with the given message.
fn require<'a>(value: &'a Option<String>, message: &'static str) -> Result<&'a str, AppError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(validation(message)),
    }
}

/// Parse an id field that arrived as a string.
fn parse_id(raw: &str, field: &str) -> Result<DbId, AppError> {
    raw.parse()
        .map_err(|_| validation(&format!("{field} must be a valid UUID")))
}

// ---------------------------------------------------------------------------
// Trigger
// ---------------------------------------------------------------------------

/// POST /api/v1/calibration/start
///
/// Create a session and run the calibration flow to a terminal state.
/// Responds 200 `{success, sessionId, data}` with the endpoint payload,
/// 400 on missing fields (no row is created), 500 on store or endpoint
/// failure (the session, once created, is marked `failed` best-effort).
pub async fn start_calibration(
    State(state): State<AppState>,
    Json(input): Json<StartCalibration>,
) -> AppResult<impl IntoResponse> {
    const REQUIRED: &str = "modelId and jupyterNotebookUrl are required";
    let model_raw = require(&input.model_id, REQUIRED)?;
    let notebook_url = require(&input.jupyter_notebook_url, REQUIRED)?;
    let model_id = parse_id(model_raw, "modelId")?;

    let session = CalibrationSessionRepo::insert_pending(&state.pool, model_id, notebook_url).await?;
    tracing::info!(session_id = %session.id, model_id = %model_id, "Calibration session created");

    match run_calibration(&state, session.id, model_id, notebook_url).await {
        Ok(data) => Ok(Json(StartCalibrationResponse {
            success: true,
            session_id: session.id,
            data,
        })),
        Err(err) => {
            // Best-effort terminal mark; if this secondary update fails
            // too, the original error is still the one surfaced.
            match CalibrationSessionRepo::fail(&state.pool, session.id, &err.to_string()).await {
                Ok(failed) => state.event_bus.publish(SessionUpdate::new(failed)),
                Err(mark_err) => tracing::warn!(
                    session_id = %session.id,
                    error = %mark_err,
                    "Failed to record calibration failure",
                ),
            }
            Err(err)
        }
    }
}

/// The fallible middle of the trigger flow: mark running, call the
/// endpoint, mark completed. Failure marking is left to the caller.
async fn run_calibration(
    state: &AppState,
    session_id: DbId,
    model_id: DbId,
    notebook_url: &str,
) -> Result<serde_json::Value, AppError> {
    let running = CalibrationSessionRepo::mark_running(&state.pool, session_id).await?;
    state.event_bus.publish(SessionUpdate::new(running));
    tracing::info!(session_id = %session_id, url = notebook_url, "Dispatching calibration to notebook endpoint");

    let data = state
        .notebook
        .start_calibration(notebook_url, session_id, model_id)
        .await?;

    let completed = CalibrationSessionRepo::complete(&state.pool, session_id, &data).await?;
    state.event_bus.publish(SessionUpdate::new(completed));
    tracing::info!(session_id = %session_id, "Calibration completed");

    Ok(data)
}

// ---------------------------------------------------------------------------
// Status update
// ---------------------------------------------------------------------------

/// POST /api/v1/calibration/status
///
/// Apply a partial status update to an existing session. The status value
/// is stored verbatim and no transition check is made; callers (the
/// notebook reporting progress, or an operator) are trusted. Responds 200
/// `{success, session}` with the updated row, 400 on missing fields, 404
/// when no session matches.
pub async fn update_calibration_status(
    State(state): State<AppState>,
    Json(input): Json<UpdateCalibrationStatus>,
) -> AppResult<impl IntoResponse> {
    const REQUIRED: &str = "sessionId and status are required";
    let session_raw = require(&input.session_id, REQUIRED)?;
    let status = require(&input.status, REQUIRED)?;
    let session_id = parse_id(session_raw, "sessionId")?;

    let session = CalibrationSessionRepo::update_status(
        &state.pool,
        session_id,
        status,
        input.calibration_data.as_ref(),
        input.error_message.as_deref(),
    )
    .await?;

    state.event_bus.publish(SessionUpdate::new(session.clone()));
    tracing::info!(session_id = %session_id, status, "Calibration status updated");

    Ok(Json(UpdateStatusResponse {
        success: true,
        session,
    }))
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// GET /api/v1/calibration/sessions/{id}
///
/// Point lookup of one session. 404 when no row matches.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = CalibrationSessionRepo::find_by_id(&state.pool, session_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CalibrationSession",
            id: session_id,
        }))?;

    Ok(Json(DataResponse { data: session }))
}
