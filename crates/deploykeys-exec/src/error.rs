//! Error types for deploykeys-exec

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while running an external command
#[derive(Error, Debug, Clone)]
pub enum ExecError {
    /// Command exited with a non-zero status
    #[error("`{program}` exited with status {status}: {stderr}")]
    CommandFailed {
        /// Program that was run
        program: String,
        /// Exit status code
        status: i32,
        /// Stderr output
        stderr: String,
    },

    /// Command timed out
    #[error("`{program}` timed out after {timeout:?}")]
    Timeout {
        /// Program that was run
        program: String,
        /// Timeout duration that was exceeded
        timeout: Duration,
    },

    /// Process spawn error
    #[error("failed to spawn `{program}`: {message}")]
    SpawnError {
        /// Program that could not be started
        program: String,
        /// Underlying OS error
        message: String,
    },

    /// I/O error while collecting output
    #[error("I/O error: {0}")]
    IoError(String),
}

impl ExecError {
    /// Exit status reported by the command, if it ran to completion
    #[must_use]
    pub fn status(&self) -> Option<i32> {
        match self {
            ExecError::CommandFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
