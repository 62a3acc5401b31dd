//! Launcher error taxonomy mapped to fixed process exit codes.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code used for any fault without a more specific classification,
/// including panics routed through the fatal-exit path.
pub const UNHANDLED_FAULT_CODE: i32 = 100000;

/// Fatal launcher failures. Every variant terminates the run; per-file
/// copy failures are handled inside the copy executor and never surface
/// here.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Could not find config file at path: {}", .0.display())]
    ConfigMissing(PathBuf),

    #[error("Could not find executable at path: {}", .0.display())]
    ExecutableMissing(PathBuf),

    /// Malformed config entry: an unrecognized value kind or a missing
    /// copy origin directory.
    #[error("{0}")]
    Operation(String),

    #[error(transparent)]
    Fault(#[from] anyhow::Error),
}

impl LaunchError {
    /// Exit code reported to the parent process on the fatal path.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::Fault(_) => UNHANDLED_FAULT_CODE,
            LaunchError::ConfigMissing(_) => 100001,
            LaunchError::Operation(_) => 100002,
            LaunchError::ExecutableMissing(_) => 100003,
        }
    }
}

pub type LaunchResult<T> = Result<T, LaunchError>;
