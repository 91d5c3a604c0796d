//! REST wrapper for the notebook calibration endpoint.

use vigia_core::types::DbId;

/// Action name the notebook endpoint dispatches on.
const START_ACTION: &str = "start_calibration";

/// HTTP client for caller-supplied notebook endpoints.
///
/// One instance is shared across the application so all calibration
/// calls reuse the same connection pool.
pub struct NotebookApi {
    client: reqwest::Client,
}

/// Errors from the notebook endpoint layer.
#[derive(Debug, thiserror::Error)]
pub enum NotebookApiError {
    /// The HTTP request itself failed (network, DNS, TLS), or a 2xx body
    /// was not valid JSON.
    #[error("Notebook request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx status code.
    #[error("Notebook endpoint responded with status {status}: {body}")]
    Endpoint {
        /// HTTP status code.
        status: u16,
        /// Raw response body for the session's error message.
        body: String,
    },
}

impl NotebookApi {
    /// Create a client with its own connection pool.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Kick off calibration for a session.
    ///
    /// Sends `POST {action, session_id, model_id}` to `url` and returns
    /// the endpoint's JSON body verbatim. No retry is performed and no
    /// timeout is set beyond the transport default.
    pub async fn start_calibration(
        &self,
        url: &str,
        session_id: DbId,
        model_id: DbId,
    ) -> Result<serde_json::Value, NotebookApiError> {
        let body = serde_json::json!({
            "action": START_ACTION,
            "session_id": session_id,
            "model_id": model_id,
        });

        let response = self.client.post(url).json(&body).send().await?;
        Self::parse_response(response).await
    }

    /// Map a response to its JSON body, or an [`Endpoint`] error on
    /// non-2xx.
    ///
    /// [`Endpoint`]: NotebookApiError::Endpoint
    async fn parse_response(
        response: reqwest::Response,
    ) -> Result<serde_json::Value, NotebookApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotebookApiError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

impl Default for NotebookApi {
    fn default() -> Self {
        Self::new()
    }
}
