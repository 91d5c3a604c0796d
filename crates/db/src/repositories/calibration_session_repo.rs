//! Repository for the `calibration_sessions` table.
//!
//! Status literals come from `CalibrationStatus` where the service itself
//! drives the lifecycle; only [`update_status`](CalibrationSessionRepo::update_status)
//! stores caller-supplied text verbatim.

use sqlx::PgPool;
use vigia_core::types::DbId;

use crate::models::calibration_session::CalibrationSession;
use crate::models::status::CalibrationStatus;

/// Column list for `calibration_sessions` queries.
const COLUMNS: &str = "\
    id, model_id, status, jupyter_notebook_url, \
    started_at, completed_at, error_message, calibration_data, created_at";

/// Lifecycle operations for calibration sessions. Every mutation RETURNs
/// the new row image so callers can publish it on the change feed without
/// a follow-up read.
pub struct CalibrationSessionRepo;

impl CalibrationSessionRepo {
    /// Insert a new `pending` session row. The store assigns the id.
    pub async fn insert_pending(
        pool: &PgPool,
        model_id: DbId,
        notebook_url: &str,
    ) -> Result<CalibrationSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO calibration_sessions (model_id, status, jupyter_notebook_url) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CalibrationSession>(&query)
            .bind(model_id)
            .bind(CalibrationStatus::Pending.as_str())
            .bind(notebook_url)
            .fetch_one(pool)
            .await
    }

    /// Move a session to `running` and stamp `started_at`.
    pub async fn mark_running(
        pool: &PgPool,
        session_id: DbId,
    ) -> Result<CalibrationSession, sqlx::Error> {
        let query = format!(
            "UPDATE calibration_sessions \
             SET status = $2, started_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CalibrationSession>(&query)
            .bind(session_id)
            .bind(CalibrationStatus::Running.as_str())
            .fetch_one(pool)
            .await
    }

    /// Terminal success: stamp `completed_at` and store the endpoint
    /// payload verbatim.
    pub async fn complete(
        pool: &PgPool,
        session_id: DbId,
        data: &serde_json::Value,
    ) -> Result<CalibrationSession, sqlx::Error> {
        let query = format!(
            "UPDATE calibration_sessions \
             SET status = $2, completed_at = NOW(), calibration_data = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CalibrationSession>(&query)
            .bind(session_id)
            .bind(CalibrationStatus::Completed.as_str())
            .bind(data)
            .fetch_one(pool)
            .await
    }

    /// Terminal failure: stamp `completed_at` and store the error message.
    pub async fn fail(
        pool: &PgPool,
        session_id: DbId,
        error: &str,
    ) -> Result<CalibrationSession, sqlx::Error> {
        let query = format!(
            "UPDATE calibration_sessions \
             SET status = $2, completed_at = NOW(), error_message = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CalibrationSession>(&query)
            .bind(session_id)
            .bind(CalibrationStatus::Failed.as_str())
            .bind(error)
            .fetch_one(pool)
            .await
    }

    /// Partial update for the status endpoint.
    ///
    /// `status` is stored verbatim. `completed` additionally stamps
    /// `completed_at` and stores the payload when one was given; `failed`
    /// stamps `completed_at` and the message when a message was given;
    /// anything else changes only `status`. No transition check is made; callers
    /// are trusted, and a terminal row can be overwritten.
    ///
    /// Errors with `RowNotFound` when no session matches.
    pub async fn update_status(
        pool: &PgPool,
        session_id: DbId,
        status: &str,
        calibration_data: Option<&serde_json::Value>,
        error_message: Option<&str>,
    ) -> Result<CalibrationSession, sqlx::Error> {
        match CalibrationStatus::parse(status) {
            Some(CalibrationStatus::Completed) => {
                let query = format!(
                    "UPDATE calibration_sessions \
                     SET status = $2, completed_at = NOW(), \
                         calibration_data = COALESCE($3, calibration_data) \
                     WHERE id = $1 \
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, CalibrationSession>(&query)
                    .bind(session_id)
                    .bind(status)
                    .bind(calibration_data)
                    .fetch_one(pool)
                    .await
            }
            Some(CalibrationStatus::Failed) if error_message.is_some() => {
                let query = format!(
                    "UPDATE calibration_sessions \
                     SET status = $2, completed_at = NOW(), error_message = $3 \
                     WHERE id = $1 \
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, CalibrationSession>(&query)
                    .bind(session_id)
                    .bind(status)
                    .bind(error_message)
                    .fetch_one(pool)
                    .await
            }
            _ => {
                let query = format!(
                    "UPDATE calibration_sessions \
                     SET status = $2 \
                     WHERE id = $1 \
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, CalibrationSession>(&query)
                    .bind(session_id)
                    .bind(status)
                    .fetch_one(pool)
                    .await
            }
        }
    }

    /// Point lookup by id.
    pub async fn find_by_id(
        pool: &PgPool,
        session_id: DbId,
    ) -> Result<Option<CalibrationSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM calibration_sessions WHERE id = $1");
        sqlx::query_as::<_, CalibrationSession>(&query)
            .bind(session_id)
            .fetch_optional(pool)
            .await
    }

    /// Count all session rows. Used by tests to assert that rejected
    /// requests never create a row.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM calibration_sessions")
            .fetch_one(pool)
            .await
    }
}
