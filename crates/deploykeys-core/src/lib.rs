//! deploykeys-core: Per-repository deploy key provisioning
//!
//! Turns a blob of concatenated PEM private keys into one SSH identity per
//! repository: each key gets a synthetic `fake{k}.github.com` host alias, an
//! SSH client stanza binding that alias to the key alone, and a git
//! `insteadOf` rule that routes the repository URL named in the key comment
//! to the alias.

pub mod alias;
pub mod config;
pub mod derive;
pub mod error;
pub mod keyfile;
pub mod keyset;
pub mod provisioner;
pub mod pubkey;
pub mod report;
pub mod rewrite;
pub mod ssh_config;

pub use alias::KeyPaths;
pub use config::ProvisionConfig;
pub use derive::{DeriveError, PublicKeyDeriver, SshKeygenDeriver};
pub use error::ProvisionError;
pub use keyset::{KeyBlock, split_key_set};
pub use provisioner::Provisioner;
pub use pubkey::{PublicKeyLine, RepoBinding};
pub use report::{ProvisionReport, ProvisionedKey};
pub use rewrite::{GitConfigRewriter, RewriteError, UrlRewriter};
