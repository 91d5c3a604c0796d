//! In-process change-notification bus backed by `tokio::sync::broadcast`.
//!
//! [`EventBus`] fans out [`SessionUpdate`] events to any number of
//! subscribers. It is designed to be shared via `Arc<EventBus>` and
//! dependency-injected through application state, never a module-level
//! singleton.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use vigia_core::types::DbId;
use vigia_db::models::calibration_session::CalibrationSession;

// ---------------------------------------------------------------------------
// SessionUpdate
// ---------------------------------------------------------------------------

/// A calibration session row changed in the store.
///
/// Carries the full new row image, mirroring a row-level change feed:
/// subscribers never need a follow-up read to see the new state.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUpdate {
    /// Id of the session whose row changed (copied out of `session` so
    /// subscribers can filter without touching the payload).
    pub session_id: DbId,

    /// The new row image.
    pub session: CalibrationSession,

    /// When the update was published (UTC).
    pub timestamp: DateTime<Utc>,
}

impl SessionUpdate {
    /// Wrap a freshly written row image for publication.
    pub fn new(session: CalibrationSession) -> Self {
        Self {
            session_id: session.id,
            session,
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out bus for session updates.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`SessionUpdate`]. Updates for
/// one session are observed in publish order.
pub struct EventBus {
    sender: broadcast::Sender<SessionUpdate>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed updates are dropped
    /// and slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an update to all current subscribers.
    ///
    /// With zero active subscribers the update is silently dropped; the
    /// row itself is already durable in the store.
    pub fn publish(&self, update: SessionUpdate) {
        let _ = self.sender.send(update);
    }

    /// Subscribe to all updates published on this bus. Per-session
    /// filtering happens at the subscriber.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionUpdate> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
