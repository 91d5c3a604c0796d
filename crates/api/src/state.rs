use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Every collaborator is constructed once at startup and injected here,
/// no module-level singletons. Cheaply cloneable (inner data is behind
/// `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vigia_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Change-notification bus for session row updates.
    pub event_bus: Arc<vigia_events::EventBus>,
    /// Client for caller-supplied notebook endpoints.
    pub notebook: Arc<vigia_notebook::NotebookApi>,
}
