//! Repository for the `models` table.

use sqlx::PgPool;

use crate::models::model::Model;

/// Column list for `models` queries.
const COLUMNS: &str = "\
    id, name, display_name, description, accuracy, auc, trials, \
    is_recommended, created_at";

/// Read access to the model catalog. The catalog is never written at
/// runtime; rows come from migrations or out-of-band administration.
pub struct ModelRepo;

impl ModelRepo {
    /// List the full catalog, recommended entries first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Model>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM models ORDER BY is_recommended DESC, created_at ASC");
        sqlx::query_as::<_, Model>(&query).fetch_all(pool).await
    }
}
