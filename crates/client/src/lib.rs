//! Client data access layer for the vigia calibration service.
//!
//! [`ApiClient`] wraps the HTTP surface (catalog, trigger, status update,
//! session lookup); [`SessionSubscription`] consumes the per-session
//! WebSocket change feed and pumps row images into a callback.

pub mod api;
pub mod subscription;

pub use api::{ApiClient, ClientError, StartedCalibration};
pub use subscription::SessionSubscription;
