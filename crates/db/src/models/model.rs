//! Model catalog entities.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vigia_core::types::{DbId, Timestamp};

/// A row from the `models` table: one pre-trained fatigue-detection
/// configuration and its reported metrics.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Model {
    pub id: DbId,
    pub name: String,
    pub display_name: String,
    pub description: String,
    /// Reported accuracy as a percentage (e.g. `94.2`).
    pub accuracy: f64,
    /// Area under the ROC curve, 0–1, when reported.
    pub auc: Option<f64>,
    /// Number of training trials, when reported.
    pub trials: Option<i32>,
    /// At most one entry is conventionally recommended for UI emphasis;
    /// not enforced by the schema.
    pub is_recommended: bool,
    pub created_at: Timestamp,
}
