//! Public key derivation from a private key file

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use deploykeys_exec::{CommandExecutor, ExecError};
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors from a public key deriver
#[derive(Error, Debug, Clone)]
pub enum DeriveError {
    /// The derivation tool failed to run or exited non-zero
    #[error(transparent)]
    Exec(#[from] ExecError),

    /// Path cannot be passed to the tool as UTF-8
    #[error("key path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
}

/// Produces the authorized-keys line for a private key file
#[async_trait]
pub trait PublicKeyDeriver: Send + Sync {
    async fn derive_public_key(&self, key_file: &Path) -> Result<String, DeriveError>;
}

/// Derives public keys with `ssh-keygen -y -f <key>`
pub struct SshKeygenDeriver {
    executor: Arc<dyn CommandExecutor>,
    program: String,
    timeout: Option<Duration>,
}

impl SshKeygenDeriver {
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

    fn args(key_file: &Path) -> Result<Vec<String>, DeriveError> {
        let path = key_file
            .to_str()
            .ok_or_else(|| DeriveError::NonUtf8Path(key_file.to_path_buf()))?;
        Ok(vec!["-y".to_string(), "-f".to_string(), path.to_string()])
    }
}

#[async_trait]
impl PublicKeyDeriver for SshKeygenDeriver {
    #[instrument(skip(self))]
    async fn derive_public_key(&self, key_file: &Path) -> Result<String, DeriveError> {
        let args = Self::args(key_file)?;
        let result = self
            .executor
            .run_with_optional_timeout(&self.program, &args, self.timeout)
            .await?
            .into_success(&self.program)?;

        debug!(
            program = %self.program,
            executor = self.executor.executor_type(),
            duration = ?result.duration,
            "derived public key"
        );
        Ok(result.stdout)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use deploykeys_exec::CommandResult;

    use super::*;

    struct ScriptedExecutor {
        status: i32,
        stdout: &'static str,
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl ScriptedExecutor {
        fn new(status: i32, stdout: &'static str) -> Self {
            Self {
                status,
                stdout,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CommandExecutor for ScriptedExecutor {
        async fn run(&self, program: &str, args: &[String]) -> Result<CommandResult, ExecError> {
            self.calls
                .lock()
                .unwrap()
                .push((program.to_string(), args.to_vec()));
            Ok(CommandResult {
                status: self.status,
                stdout: self.stdout.to_string(),
                stderr: if self.status == 0 {
                    String::new()
                } else {
                    "invalid format".to_string()
                },
                duration: Duration::from_millis(1),
            })
        }

        async fn run_with_timeout(
            &self,
            program: &str,
            args: &[String],
            _timeout: Duration,
        ) -> Result<CommandResult, ExecError> {
            self.run(program, args).await
        }

        fn executor_type(&self) -> &'static str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn test_invokes_keygen_with_key_path() {
        let executor = Arc::new(ScriptedExecutor::new(0, "ssh-ed25519 AAAA git@github.com:a/b.git\n"));
        let deriver = SshKeygenDeriver::new(executor.clone(), "ssh-keygen", None);

        let line = deriver
            .derive_public_key(Path::new("/ssh/fake0.github.com"))
            .await
            .unwrap();

        assert_eq!(line, "ssh-ed25519 AAAA git@github.com:a/b.git\n");
        let calls = executor.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "ssh-keygen");
        assert_eq!(calls[0].1, ["-y", "-f", "/ssh/fake0.github.com"]);
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_labeled() {
        let executor = Arc::new(ScriptedExecutor::new(255, ""));
        let deriver = SshKeygenDeriver::new(executor, "ssh-keygen", Some(Duration::from_secs(5)));

        let err = deriver
            .derive_public_key(Path::new("/ssh/fake0.github.com"))
            .await
            .unwrap_err();

        match err {
            DeriveError::Exec(ExecError::CommandFailed { status, stderr, .. }) => {
                assert_eq!(status, 255);
                assert_eq!(stderr, "invalid format");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
