//! Vigia API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! the WebSocket feed) so integration tests and the binary entrypoint
//! share one construction path.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;
pub mod ws;
