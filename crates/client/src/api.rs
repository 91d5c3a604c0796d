//! Typed wrappers over the calibration service HTTP API.

use serde::Deserialize;
use serde_json::Value;
use vigia_core::types::DbId;
use vigia_db::models::calibration_session::CalibrationSession;
use vigia_db::models::model::Model;

/// Errors surfaced by the data access layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS), or a response
    /// body failed to decode.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered non-2xx. `message` comes from the response
    /// body's `error` field when present, else a per-operation fallback.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Point lookup of a session that does not exist.
    #[error("Calibration session not found")]
    NotFound,

    /// The change-feed WebSocket could not be established.
    #[error("Subscription error: {0}")]
    Subscription(String),
}

/// `{ "data": ... }` envelope used by the read endpoints.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// Body of a successful trigger call.
#[derive(Debug, Deserialize)]
pub struct StartedCalibration {
    pub success: bool,
    #[serde(rename = "sessionId")]
    pub session_id: DbId,
    /// The notebook endpoint's JSON response, verbatim.
    pub data: Value,
}

/// Body of a successful status update: `{success, session}`.
#[derive(Debug, Deserialize)]
struct UpdatedStatus {
    session: CalibrationSession,
}

/// Error bodies are `{"error": message}`; tolerate anything else.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for one calibration service instance.
///
/// Explicitly constructed with a base URL and passed to whatever owns the
/// workflow. Lifecycle belongs to the caller; there is no shared global
/// instance.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for a service base URL, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url)
    }

    /// WebSocket URL for one session's change feed.
    pub(crate) fn feed_url(&self, session_id: DbId) -> String {
        let ws_base = if let Some(rest) = self.base_url.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.base_url.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            self.base_url.clone()
        };
        format!("{ws_base}/api/v1/calibration/sessions/{session_id}/ws")
    }

    /// Fetch the model catalog, recommended entries first.
    pub async fn get_models(&self) -> Result<Vec<Model>, ClientError> {
        let response = self.http.get(self.url("/models")).send().await?;
        let response = Self::check(response, "Failed to fetch models").await?;
        Ok(response.json::<DataEnvelope<Vec<Model>>>().await?.data)
    }

    /// Trigger a calibration run for `model_id` against `notebook_url`.
    ///
    /// Resolves once the run reaches a terminal state; subscribe to the
    /// session feed for intermediate updates.
    pub async fn start_calibration(
        &self,
        model_id: DbId,
        notebook_url: &str,
    ) -> Result<StartedCalibration, ClientError> {
        let body = serde_json::json!({
            "modelId": model_id,
            "jupyterNotebookUrl": notebook_url,
        });

        let response = self
            .http
            .post(self.url("/calibration/start"))
            .json(&body)
            .send()
            .await?;
        let response = Self::check(response, "Failed to start calibration").await?;
        Ok(response.json().await?)
    }

    /// Point lookup of one session.
    pub async fn get_calibration_session(
        &self,
        session_id: DbId,
    ) -> Result<CalibrationSession, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/calibration/sessions/{session_id}")))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }

        let response = Self::check(response, "Failed to fetch calibration session").await?;
        Ok(response
            .json::<DataEnvelope<CalibrationSession>>()
            .await?
            .data)
    }

    /// Apply a partial status update; returns the updated row.
    pub async fn update_calibration_status(
        &self,
        session_id: DbId,
        status: &str,
        calibration_data: Option<Value>,
        error_message: Option<String>,
    ) -> Result<CalibrationSession, ClientError> {
        let body = serde_json::json!({
            "sessionId": session_id,
            "status": status,
            "calibrationData": calibration_data,
            "errorMessage": error_message,
        });

        let response = self
            .http
            .post(self.url("/calibration/status"))
            .json(&body)
            .send()
            .await?;
        let response = Self::check(response, "Failed to update calibration status").await?;
        Ok(response.json::<UpdatedStatus>().await?.session)
    }

    /// Pass 2xx responses through; otherwise build an [`Api`] error from
    /// the body's `error` field, defaulting to `fallback`.
    ///
    /// [`Api`]: ClientError::Api
    async fn check(
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| fallback.to_string());

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
