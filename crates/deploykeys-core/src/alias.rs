//! Per-key host aliases and file locations

use std::path::{Path, PathBuf};

use crate::config::GITHUB_HOST;

/// Alias and key file paths for the key at `index`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPaths {
    /// `fake{index}.github.com`
    pub alias: String,
    /// `<ssh_dir>/{alias}`
    pub key_file: PathBuf,
    /// `<ssh_dir>/{alias}.pub`
    pub public_key_file: PathBuf,
}

impl KeyPaths {
    pub fn new(ssh_dir: &Path, index: usize) -> Self {
        let alias = format!("fake{index}.{GITHUB_HOST}");
        let key_file = ssh_dir.join(&alias);
        let public_key_file = ssh_dir.join(format!("{alias}.pub"));
        Self {
            alias,
            key_file,
            public_key_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_follow_alias() {
        let paths = KeyPaths::new(Path::new("/home/runner/.ssh"), 0);
        assert_eq!(paths.alias, "fake0.github.com");
        assert_eq!(
            paths.key_file,
            PathBuf::from("/home/runner/.ssh/fake0.github.com")
        );
        assert_eq!(
            paths.public_key_file,
            PathBuf::from("/home/runner/.ssh/fake0.github.com.pub")
        );
    }

    #[test]
    fn test_index_is_not_padded() {
        assert_eq!(KeyPaths::new(Path::new("/s"), 12).alias, "fake12.github.com");
    }
}
