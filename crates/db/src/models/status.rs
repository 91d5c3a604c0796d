//! Calibration session status values.
//!
//! Stored as text in `calibration_sessions.status`. The status-update
//! endpoint stores caller-supplied values verbatim, so session rows carry
//! a `String`; this enum names only the values the service itself writes.

use std::fmt;

/// Lifecycle status of a calibration session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl CalibrationStatus {
    /// Database/wire text for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            CalibrationStatus::Pending => "pending",
            CalibrationStatus::Running => "running",
            CalibrationStatus::Completed => "completed",
            CalibrationStatus::Failed => "failed",
        }
    }

    /// Parse a recognized status value. `None` for anything else:
    /// unrecognized values are not an error, they pass through to the
    /// store untouched.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(CalibrationStatus::Pending),
            "running" => Some(CalibrationStatus::Running),
            "completed" => Some(CalibrationStatus::Completed),
            "failed" => Some(CalibrationStatus::Failed),
            _ => None,
        }
    }

    /// Terminal sessions never transition again (an invariant the trigger
    /// handler's flow guarantees; the status endpoint does not enforce it).
    pub fn is_terminal(self) -> bool {
        matches!(self, CalibrationStatus::Completed | CalibrationStatus::Failed)
    }
}

impl fmt::Display for CalibrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
