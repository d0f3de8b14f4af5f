//! Exit status codes for the CLI
//!
//! - 0: Success
//! - 1: Any error (bad input file, invalid config, lint errors, lookup miss)

use std::process::{ExitCode, Termination};

/// Exit status codes following standard Unix conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    /// Successful execution
    Success = 0,
    /// Any error, including `lint` finding error-kind diagnostics
    Error = 1,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}

impl ExitStatus {
    /// Exit status for a lint run: only error-kind diagnostics fail it
    pub fn from_lint(has_errors: bool) -> Self {
        if has_errors {
            ExitStatus::Error
        } else {
            ExitStatus::Success
        }
    }
}
