//! Git URL rewrite registration

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use deploykeys_exec::{CommandExecutor, ExecError};
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors from a URL rewriter
#[derive(Error, Debug, Clone)]
pub enum RewriteError {
    /// The configuration tool failed to run or exited non-zero
    #[error(transparent)]
    Exec(#[from] ExecError),
}

/// Persistent "fetch `pattern` from `replacement` instead" rules
///
/// Registrations are additive; earlier rules stay in place.
#[async_trait]
pub trait UrlRewriter: Send + Sync {
    async fn register_url_rewrite(&self, pattern: &str, replacement: &str)
    -> Result<(), RewriteError>;
}

/// Registers rewrites as `git config --global url.<replacement>.insteadOf <pattern>`
pub struct GitConfigRewriter {
    executor: Arc<dyn CommandExecutor>,
    program: String,
    timeout: Option<Duration>,
}

impl GitConfigRewriter {
    pub fn new(
        executor: Arc<dyn CommandExecutor>,
        program: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            executor,
            program: program.into(),
            timeout,
        }
    }

    fn args(pattern: &str, replacement: &str) -> Vec<String> {
        vec![
            "config".to_string(),
            "--global".to_string(),
            format!("url.{replacement}.insteadOf"),
            pattern.to_string(),
        ]
    }
}

#[async_trait]
impl UrlRewriter for GitConfigRewriter {
    #[instrument(skip(self))]
    async fn register_url_rewrite(
        &self,
        pattern: &str,
        replacement: &str,
    ) -> Result<(), RewriteError> {
        let args = Self::args(pattern, replacement);
        self.executor
            .run_with_optional_timeout(&self.program, &args, self.timeout)
            .await?
            .into_success(&self.program)?;

        debug!(program = %self.program, pattern = %pattern, replacement = %replacement, "registered url rewrite");
        Ok(())
    }
}
