//! Shared domain types and errors for the vigia calibration service.

pub mod error;
pub mod types;
