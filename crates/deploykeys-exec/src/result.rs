//! Result types for command execution

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ExecError;

/// Result of a command execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResult {
    /// Exit status code (0 for success, -1 when killed by a signal)
    pub status: i32,
    /// stdout output
    pub stdout: String,
    /// stderr output
    pub stderr: String,
    /// Time taken to execute
    pub duration: Duration,
}

impl CommandResult {
    /// Check if command succeeded (exit code 0)
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == 0
    }

    /// Turn a non-zero exit into [`ExecError::CommandFailed`]
    ///
    /// # Errors
    /// Returns `CommandFailed` carrying the trimmed stderr when the status is non-zero
    pub fn into_success(self, program: &str) -> Result<Self, ExecError> {
        if self.success() {
            Ok(self)
        } else {
            Err(ExecError::CommandFailed {
                program: program.to_string(),
                status: self.status,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}
