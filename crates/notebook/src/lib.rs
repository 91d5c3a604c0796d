//! HTTP client for the externally hosted calibration notebook endpoint.
//!
//! The endpoint URL is supplied per calibration session by the caller;
//! [`NotebookApi`] wraps a shared [`reqwest::Client`] and issues the
//! calibration kick-off request. What the endpoint computes is outside
//! this system; only its JSON response is carried back.

pub mod api;

pub use api::{NotebookApi, NotebookApiError};
