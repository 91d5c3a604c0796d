//! Request handlers.
//!
//! Handlers delegate to the repositories in `vigia_db`, publish row
//! images on the event bus after every session write, and map errors via
//! [`AppError`](crate::error::AppError).

pub mod calibration;
pub mod models;
