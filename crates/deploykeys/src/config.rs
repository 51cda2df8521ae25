//! Configuration loading and types

use std::path::{Path, PathBuf};
use std::time::Duration;

use deploykeys_core::ProvisionConfig;
use eyre::{WrapErr, eyre};
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "DEPLOYKEYS_CONFIG";
pub const CONFIG_FILENAME: &str = "deploykeys.toml";

/// Top-level configuration, mapped from `deploykeys.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub provision: ProvisionSection,
    #[serde(default)]
    pub log: LogSection,
}

/// `[provision]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvisionSection {
    /// Target directory; defaults to `~/.ssh`
    pub ssh_dir: Option<PathBuf>,
    #[serde(default = "default_keygen_program")]
    pub keygen_program: String,
    #[serde(default = "default_git_program")]
    pub git_program: String,
    /// Per-command timeout; unset waits indefinitely
    pub command_timeout_secs: Option<u64>,
}

impl Default for ProvisionSection {
    fn default() -> Self {
        Self {
            ssh_dir: None,
            keygen_program: default_keygen_program(),
            git_program: default_git_program(),
            command_timeout_secs: None,
        }
    }
}

fn default_keygen_program() -> String {
    "ssh-keygen".to_string()
}

fn default_git_program() -> String {
    "git".to_string()
}

/// `[log]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .wrap_err_with(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load from an explicit path, the environment, or the default locations
    ///
    /// A missing file at a default location falls back to defaults; a missing
    /// explicit or environment-named file is an error.
    ///
    /// # Errors
    /// Returns error if the chosen file cannot be read or parsed
    pub fn load_default(explicit: Option<&Path>) -> eyre::Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            return Ok((Self::load(&path)?, Some(path)));
        }

        let paths = [
            Some(PathBuf::from(CONFIG_FILENAME)),
            dirs::config_dir().map(|p| p.join("deploykeys").join(CONFIG_FILENAME)),
        ];

        for path in paths.into_iter().flatten() {
            if path.exists() {
                return Ok((Self::load(&path)?, Some(path)));
            }
        }

        Ok((Config::default(), None))
    }

    /// Resolve into core settings, defaulting the SSH directory to `~/.ssh`
    ///
    /// # Errors
    /// Returns error if no SSH directory is configured and no home directory is known
    pub fn provision_config(&self) -> eyre::Result<ProvisionConfig> {
        let ssh_dir = match &self.provision.ssh_dir {
            Some(dir) => dir.clone(),
            None => dirs::home_dir()
                .map(|home| home.join(".ssh"))
                .ok_or_else(|| eyre!("cannot determine home directory; set provision.ssh_dir"))?,
        };

        Ok(ProvisionConfig::new(ssh_dir)
            .with_keygen_program(&self.provision.keygen_program)
            .with_git_program(&self.provision.git_program)
            .with_command_timeout(self.provision.command_timeout_secs.map(Duration::from_secs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.provision.keygen_program, "ssh-keygen");
        assert_eq!(config.provision.git_program, "git");
        assert_eq!(config.log.level, "info");
        assert_eq!(config.log.format, LogFormat::Text);
        assert!(config.provision.ssh_dir.is_none());
    }

    #[test]
    fn test_partial_override() {
        let config: Config = toml::from_str(
            r#"
            [provision]
            ssh_dir = "/home/runner/.ssh"
            command_timeout_secs = 20

            [log]
            format = "json"
            "#,
        )
        .unwrap();

        let provision = config.provision_config().unwrap();
        assert_eq!(provision.ssh_dir, PathBuf::from("/home/runner/.ssh"));
        assert_eq!(provision.keygen_program, "ssh-keygen");
        assert_eq!(provision.command_timeout, Some(Duration::from_secs(20)));
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[provision]\nhost = \"gitlab.com\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[provision]\ngit_program = \"/usr/local/bin/git\"\n").unwrap();

        let (config, source) = Config::load_default(Some(&path)).unwrap();
        assert_eq!(config.provision.git_program, "/usr/local/bin/git");
        assert_eq!(source, Some(path));
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(Config::load_default(Some(&path)).is_err());
    }
}
