//! Provisioning settings and fixed GitHub constants

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Real host every alias resolves to
pub const GITHUB_HOST: &str = "github.com";

/// Required start of a key comment
pub const COMMENT_PREFIX: &str = "git@github.com:";

/// Required end of a key comment
pub const COMMENT_SUFFIX: &str = ".git";

/// GitHub's RSA host key, pinned in `known_hosts`.
///
/// Sourced from <https://api.github.com/meta>.
pub const GITHUB_RSA_HOST_KEY: &str = concat!(
    "AAAAB3NzaC1yc2EAAAADAQABAAABgQCj7ndNxQowgcQnjshcLrqPEiiphnt+VTT",
    "vDP6mHBL9j1aNUkY4Ue1gvwnGLVlOhGeYrnZaMgRK6+PKCUXaDbC7qtbW8gIkhL",
    "7aGCsOr/C56SJMy/BCZfxd1nWzAOxSDPgVsmerOBYfNqltV9/hWCqBywINIR+5d",
    "Ig6JTJ72pcEpEjcYgXkE2YEFXV1JHnsKgbLWNlhScqb2UmyRkQyytRLtL+38TGx",
    "kxCflmO+5Z8CSSNY7GidjMIZ7Q4zMjA2n1nGrlTDkzwDCsw+wqFPGQA179cnfGW",
    "OWRVruj16z6XyvxvjJwbz0wQZ75XK5tKSb7FNyeIEs4TT4jk+S4dhPeAUC5y+bD",
    "YirYgM4GC7uEnztnZyaVWQ7B381AK4Qdrwt51ZqExKbQpTUNn+EjqoTwvqNj4kq",
    "x5QUCI0ThS/YkOxJCXmPUWZbhjpCg56i+2aB6CmK2JGhn57K5mj0MNdBXA4/Wnw",
    "H6XoPWJzK5Nyu2zB3nAZp+S5hpQs+p1vN1/wsjk=",
);

pub const KNOWN_HOSTS_FILENAME: &str = "known_hosts";
pub const SSH_CONFIG_FILENAME: &str = "config";

/// Runtime settings for a provisioning run
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// Directory receiving keys, `known_hosts` and `config`
    pub ssh_dir: PathBuf,
    /// Program used to derive public keys
    pub keygen_program: String,
    /// Program used to register URL rewrites
    pub git_program: String,
    /// Upper bound for each external command; `None` waits indefinitely
    pub command_timeout: Option<Duration>,
}

impl ProvisionConfig {
    /// Create settings targeting `ssh_dir` with the stock `ssh-keygen` and `git`
    pub fn new(ssh_dir: impl Into<PathBuf>) -> Self {
        Self {
            ssh_dir: ssh_dir.into(),
            keygen_program: "ssh-keygen".to_string(),
            git_program: "git".to_string(),
            command_timeout: None,
        }
    }

    /// Set the public key derivation program
    #[must_use]
    pub fn with_keygen_program(mut self, program: impl Into<String>) -> Self {
        self.keygen_program = program.into();
        self
    }

    /// Set the git program
    #[must_use]
    pub fn with_git_program(mut self, program: impl Into<String>) -> Self {
        self.git_program = program.into();
        self
    }

    /// Bound every external command by `timeout`
    #[must_use]
    pub fn with_command_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.command_timeout = timeout;
        self
    }

    #[must_use]
    pub fn ssh_dir(&self) -> &Path {
        &self.ssh_dir
    }

    #[must_use]
    pub fn known_hosts_file(&self) -> PathBuf {
        self.ssh_dir.join(KNOWN_HOSTS_FILENAME)
    }

    #[must_use]
    pub fn ssh_config_file(&self) -> PathBuf {
        self.ssh_dir.join(SSH_CONFIG_FILENAME)
    }
}
