//! Public key line parsing and key comment validation

use std::path::Path;

use serde::Serialize;

use crate::config::{COMMENT_PREFIX, COMMENT_SUFFIX};
use crate::error::ProvisionError;

/// An authorized-keys line: `<algorithm> <base64> <comment>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyLine {
    pub algorithm: String,
    pub key: String,
    pub comment: String,
}

impl PublicKeyLine {
    /// Parse the content of a `.pub` file
    ///
    /// Fields are separated by single spaces, so a doubled space counts as an
    /// empty field.
    ///
    /// # Errors
    /// Returns `IllegalPublicKey` with the raw content unless there are exactly three fields
    pub fn parse(raw: &str, key_file: &Path) -> Result<Self, ProvisionError> {
        let fields: Vec<&str> = raw.trim().split(' ').collect();
        let [algorithm, key, comment] = fields.as_slice() else {
            return Err(ProvisionError::IllegalPublicKey {
                key_file: key_file.to_path_buf(),
                content: raw.to_string(),
            });
        };
        Ok(Self {
            algorithm: (*algorithm).to_string(),
            key: (*key).to_string(),
            comment: (*comment).to_string(),
        })
    }
}

/// Repository a key is authorized for, recovered from its comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoBinding {
    /// `git@github.com:<path>`, the `insteadOf` pattern
    pub repo_url: String,
    /// `<owner>/<repo>`
    pub path: String,
}

impl RepoBinding {
    /// Validate `comment` as `git@github.com:<path>.git`
    ///
    /// The prefix is checked before the suffix.
    ///
    /// # Errors
    /// `CommentPrefix` or `CommentSuffix` naming `key_file`
    pub fn from_comment(comment: &str, key_file: &Path) -> Result<Self, ProvisionError> {
        let Some(rest) = comment.strip_prefix(COMMENT_PREFIX) else {
            return Err(ProvisionError::CommentPrefix {
                key_file: key_file.to_path_buf(),
            });
        };
        let Some(path) = rest.strip_suffix(COMMENT_SUFFIX) else {
            return Err(ProvisionError::CommentSuffix {
                key_file: key_file.to_path_buf(),
            });
        };
        Ok(Self {
            repo_url: format!("{COMMENT_PREFIX}{path}"),
            path: path.to_string(),
        })
    }

    /// URL that routes this repository through `alias`
    #[must_use]
    pub fn rewrite_target(&self, alias: &str) -> String {
        format!("git@{alias}:{}", self.path)
    }
}
