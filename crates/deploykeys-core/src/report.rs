//! Summary of a provisioning run

use std::path::PathBuf;

use serde::Serialize;

/// One key that was fully provisioned
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionedKey {
    pub index: usize,
    pub alias: String,
    pub key_file: PathBuf,
    pub public_key_file: PathBuf,
    pub comment: String,
    /// URL callers keep using
    pub repo_url: String,
    /// Alias URL git substitutes for `repo_url`
    pub rewrite_target: String,
}

/// Artifacts written by a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionReport {
    pub ssh_dir: PathBuf,
    pub known_hosts_file: PathBuf,
    pub ssh_config_file: PathBuf,
    pub entries: Vec<ProvisionedKey>,
}

impl ProvisionReport {
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_paths_as_strings() {
        let report = ProvisionReport {
            ssh_dir: PathBuf::from("/h/.ssh"),
            known_hosts_file: PathBuf::from("/h/.ssh/known_hosts"),
            ssh_config_file: PathBuf::from("/h/.ssh/config"),
            entries: vec![ProvisionedKey {
                index: 0,
                alias: "fake0.github.com".to_string(),
                key_file: PathBuf::from("/h/.ssh/fake0.github.com"),
                public_key_file: PathBuf::from("/h/.ssh/fake0.github.com.pub"),
                comment: "git@github.com:acme/widgets.git".to_string(),
                repo_url: "git@github.com:acme/widgets".to_string(),
                rewrite_target: "git@fake0.github.com:acme/widgets".to_string(),
            }],
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["entries"][0]["key_file"], "/h/.ssh/fake0.github.com");
        assert_eq!(json["entries"][0]["rewrite_target"], "git@fake0.github.com:acme/widgets");
        assert_eq!(report.key_count(), 1);
    }
}
