//! Error types for deploykeys-core

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{COMMENT_PREFIX, COMMENT_SUFFIX};
use crate::derive::DeriveError;
use crate::rewrite::RewriteError;

/// Reasons a provisioning run stops
///
/// Every per-key variant names the private key file so an operator can find
/// the offending key among many.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// No key material was supplied
    #[error("The parameter \"keys\" is empty")]
    EmptyKeys,

    /// Key block has fewer than two lines
    #[error("{}: too short lines", .key_file.display())]
    KeyTooShort {
        /// Private key file that was written
        key_file: PathBuf,
    },

    /// Key block is not wrapped in BEGIN/END lines
    #[error(
        "{}: private key must start with the line \"-----BEGIN...-----\" and end with the line \"-----END...-----\"",
        .key_file.display()
    )]
    MalformedEnvelope {
        /// Private key file that was written
        key_file: PathBuf,
    },

    /// The public key could not be derived from the private key
    #[error("{}: failed to derive public key: {source}", .key_file.display())]
    DerivationFailed {
        /// Private key file passed to the deriver
        key_file: PathBuf,
        /// Deriver failure
        #[source]
        source: DeriveError,
    },

    /// Derived public key line is not `<algorithm> <key> <comment>`
    #[error("{}: illegal comment: {content}", .key_file.display())]
    IllegalPublicKey {
        /// Private key file
        key_file: PathBuf,
        /// Raw public key file content
        content: String,
    },

    /// Key comment does not name a GitHub SSH URL
    #[error("{}: key comment doesn't start with \"{}\"", .key_file.display(), COMMENT_PREFIX)]
    CommentPrefix {
        /// Private key file
        key_file: PathBuf,
    },

    /// Key comment does not end in `.git`
    #[error("{}: key comment doesn't end with \"{}\"", .key_file.display(), COMMENT_SUFFIX)]
    CommentSuffix {
        /// Private key file
        key_file: PathBuf,
    },

    /// URL rewrite registration failed
    #[error("{}: failed to register rewrite for {pattern}: {source}", .key_file.display())]
    RewriteFailed {
        /// Private key file
        key_file: PathBuf,
        /// URL that should have been rewritten
        pattern: String,
        /// Rewriter failure
        #[source]
        source: RewriteError,
    },

    /// Filesystem failure
    #[error("{}: {source}", .path.display())]
    Io {
        /// Path being created, written or read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ProvisionError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        ProvisionError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Private key file implicated in the failure, if any
    #[must_use]
    pub fn key_file(&self) -> Option<&Path> {
        match self {
            ProvisionError::KeyTooShort { key_file }
            | ProvisionError::MalformedEnvelope { key_file }
            | ProvisionError::DerivationFailed { key_file, .. }
            | ProvisionError::IllegalPublicKey { key_file, .. }
            | ProvisionError::CommentPrefix { key_file }
            | ProvisionError::CommentSuffix { key_file }
            | ProvisionError::RewriteFailed { key_file, .. } => Some(key_file),
            ProvisionError::EmptyKeys | ProvisionError::Io { .. } => None,
        }
    }
}
