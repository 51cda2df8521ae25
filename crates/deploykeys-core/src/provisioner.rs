//! The key provisioning run

use std::sync::Arc;

use deploykeys_exec::LocalExecutor;
use tracing::{info, instrument};

use crate::alias::KeyPaths;
use crate::config::ProvisionConfig;
use crate::derive::{PublicKeyDeriver, SshKeygenDeriver};
use crate::error::ProvisionError;
use crate::keyfile;
use crate::keyset::{KeyBlock, split_key_set};
use crate::pubkey::{PublicKeyLine, RepoBinding};
use crate::report::{ProvisionReport, ProvisionedKey};
use crate::rewrite::{GitConfigRewriter, UrlRewriter};
use crate::ssh_config::{self, STANZA_LINES};

/// Writes keys, `known_hosts`, SSH config and URL rewrites for a key set
///
/// Runs fail-fast: the first bad key ends the run, and anything already
/// written or registered stays in place.
pub struct Provisioner {
    config: ProvisionConfig,
    deriver: Arc<dyn PublicKeyDeriver>,
    rewriter: Arc<dyn UrlRewriter>,
}

impl Provisioner {
    pub fn new(
        config: ProvisionConfig,
        deriver: Arc<dyn PublicKeyDeriver>,
        rewriter: Arc<dyn UrlRewriter>,
    ) -> Self {
        Self {
            config,
            deriver,
            rewriter,
        }
    }

    /// Provisioner backed by the local `ssh-keygen` and `git`
    pub fn local(config: ProvisionConfig) -> Self {
        let executor = Arc::new(LocalExecutor::new());
        let deriver = Arc::new(SshKeygenDeriver::new(
            executor.clone(),
            config.keygen_program.clone(),
            config.command_timeout,
        ));
        let rewriter = Arc::new(GitConfigRewriter::new(
            executor,
            config.git_program.clone(),
            config.command_timeout,
        ));
        Self::new(config, deriver, rewriter)
    }

    #[must_use]
    pub fn config(&self) -> &ProvisionConfig {
        &self.config
    }

    /// Provision every key in `keys`, in input order
    ///
    /// # Errors
    /// Returns the first failure; see [`ProvisionError`]
    #[instrument(skip_all, fields(ssh_dir = %self.config.ssh_dir.display()))]
    pub async fn provision(&self, keys: Option<&str>) -> Result<ProvisionReport, ProvisionError> {
        let blocks = split_key_set(keys)?;
        info!(keys = blocks.len(), "provisioning deploy keys");

        keyfile::ensure_dir(&self.config.ssh_dir)?;

        let known_hosts_file = self.config.known_hosts_file();
        keyfile::write_file(&known_hosts_file, &ssh_config::known_hosts_record())?;
        info!("{}: created", known_hosts_file.display());

        let mut stanzas = Vec::with_capacity(blocks.len() * STANZA_LINES);
        let mut entries = Vec::with_capacity(blocks.len());
        for (index, block) in blocks.iter().enumerate() {
            let entry = self.provision_key(index, block).await?;
            stanzas.extend(ssh_config::stanza(&entry.alias, &entry.key_file));
            entries.push(entry);
        }

        let ssh_config_file = self.config.ssh_config_file();
        keyfile::write_file(&ssh_config_file, &ssh_config::render(&stanzas))?;
        info!("{}: created", ssh_config_file.display());

        Ok(ProvisionReport {
            ssh_dir: self.config.ssh_dir.clone(),
            known_hosts_file,
            ssh_config_file,
            entries,
        })
    }

    #[instrument(skip(self, block))]
    async fn provision_key(
        &self,
        index: usize,
        block: &KeyBlock,
    ) -> Result<ProvisionedKey, ProvisionError> {
        let KeyPaths {
            alias,
            key_file,
            public_key_file,
        } = KeyPaths::new(&self.config.ssh_dir, index);

        // The key lands on disk before validation so a bad one can be inspected.
        keyfile::write_private_key(&key_file, &block.normalized())?;
        info!("{}: created", key_file.display());

        block.check_envelope(&key_file)?;

        let public_key = self
            .deriver
            .derive_public_key(&key_file)
            .await
            .map_err(|source| ProvisionError::DerivationFailed {
                key_file: key_file.clone(),
                source,
            })?;
        keyfile::write_file(&public_key_file, &public_key)?;
        info!("{}: created", public_key_file.display());

        let raw = keyfile::read_file(&public_key_file)?;
        let PublicKeyLine { comment, .. } = PublicKeyLine::parse(&raw, &key_file)?;
        info!("{}: key comment is \"{}\"", key_file.display(), comment);

        let binding = RepoBinding::from_comment(&comment, &key_file)?;
        let rewrite_target = binding.rewrite_target(&alias);
        self.rewriter
            .register_url_rewrite(&binding.repo_url, &rewrite_target)
            .await
            .map_err(|source| ProvisionError::RewriteFailed {
                key_file: key_file.clone(),
                pattern: binding.repo_url.clone(),
                source,
            })?;
        info!(from = %binding.repo_url, to = %rewrite_target, "url rewrite registered");

        Ok(ProvisionedKey {
            index,
            alias,
            key_file,
            public_key_file,
            comment,
            repo_url: binding.repo_url,
            rewrite_target,
        })
    }
}
