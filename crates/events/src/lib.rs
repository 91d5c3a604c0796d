//! Change-notification infrastructure for calibration sessions.
//!
//! Provides [`EventBus`], the in-process publish/subscribe hub carrying
//! [`SessionUpdate`] events (one per session row update) from the
//! handlers that write rows to the WebSocket feeds that stream them.

pub mod bus;

pub use bus::{EventBus, SessionUpdate};
