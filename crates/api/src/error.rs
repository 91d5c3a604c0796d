use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vigia_core::error::CoreError;
use vigia_notebook::NotebookApiError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors plus the database and notebook
/// endpoint layers. Implements [`IntoResponse`] to produce the uniform
/// `{"error": message}` JSON body the frontend displays verbatim: free
/// text only, no machine-readable codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `vigia_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The external calibration endpoint call failed.
    #[error(transparent)]
    Endpoint(#[from] NotebookApiError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::Endpoint(err) => {
                tracing::error!(error = %err, "Notebook endpoint call failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        let body = json!({ "error": message });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status and message.
///
/// `RowNotFound` maps to 404; everything else maps to 500 carrying the
/// underlying message, which the frontend shows to the user.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "Calibration session not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {other}"),
            )
        }
    }
}
