//! Row structs and wire DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct
//! matching the database row, plus the request DTOs for the endpoints
//! that write to it.

pub mod calibration_session;
pub mod model;
pub mod status;
