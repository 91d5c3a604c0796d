//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod calibration_session_repo;
pub mod model_repo;

pub use calibration_session_repo::CalibrationSessionRepo;
pub use model_repo::ModelRepo;
