//! Command executor trait

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ExecError;
use crate::result::CommandResult;

/// Runs a program with arguments and collects its output.
///
/// A non-zero exit status is not an error at this layer; callers inspect
/// [`CommandResult::success`].
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandResult, ExecError>;

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<CommandResult, ExecError>;

    fn executor_type(&self) -> &'static str;

    /// Run with a timeout when one is given, otherwise wait indefinitely
    async fn run_with_optional_timeout(
        &self,
        program: &str,
        args: &[String],
        timeout: Option<Duration>,
    ) -> Result<CommandResult, ExecError> {
        match timeout {
            Some(timeout) => self.run_with_timeout(program, args, timeout).await,
            None => self.run(program, args).await,
        }
    }
}
