//! Calibration session entities and request DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vigia_core::types::{DbId, Timestamp};

/// A row from the `calibration_sessions` table: one attempt to run
/// calibration against an external notebook endpoint.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CalibrationSession {
    pub id: DbId,
    pub model_id: DbId,
    /// Free text; the service writes `pending`/`running`/`completed`/
    /// `failed`, the status endpoint stores caller values verbatim.
    pub status: String,
    pub jupyter_notebook_url: Option<String>,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    /// Populated when a run fails.
    pub error_message: Option<String>,
    /// Opaque endpoint payload, stored verbatim on completion. No field
    /// of it is interpreted by this service.
    pub calibration_data: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// DTO for `POST /api/v1/calibration/start`.
///
/// Both fields are required; they are `Option` so the handler can answer
/// a 400 with the frontend-facing message instead of a deserialization
/// rejection. `model_id` arrives as a string and is parsed to a UUID by
/// the handler.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartCalibration {
    pub model_id: Option<String>,
    pub jupyter_notebook_url: Option<String>,
}

/// DTO for `POST /api/v1/calibration/status`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCalibrationStatus {
    pub session_id: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub calibration_data: Option<serde_json::Value>,
    #[serde(default)]
    pub error_message: Option<String>,
}
