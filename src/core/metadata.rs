//! Credential metadata store.
//!
//! Titles and attributes live in `.lockbox.toml`, keyed by logical secret
//! name. The reconciler only ever merges into an entry; keys it was not
//! given are left as they are.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::config::Config;
use crate::core::domain::CredentialEntry;
use crate::core::types::Attributes;
use crate::error::MetadataError;

/// Local metadata store.
pub trait MetadataStore {
    /// Merge `title` and `attributes` into the entry for `name`, creating it
    /// if needed.
    fn upsert(
        &mut self,
        name: &str,
        title: Option<&str>,
        attributes: &Attributes,
    ) -> Result<(), MetadataError>;

    /// Look up the entry for `name`.
    fn lookup(&self, name: &str) -> Option<&CredentialEntry>;

    /// Drop the entry for `name`. Returns whether one existed.
    fn remove(&mut self, name: &str) -> Result<bool, MetadataError>;
}

/// Metadata store backed by a loaded `Config` and its file.
#[derive(Debug)]
pub struct ConfigMetadata {
    config: Config,
    path: PathBuf,
}

impl ConfigMetadata {
    /// Wrap a loaded config; writes go to `path`.
    pub fn new(config: Config, path: impl AsRef<Path>) -> Self {
        Self {
            config,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The current config, including merged entries.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Save the config, restoring `previous` for `name` if the write fails.
    fn commit(
        &mut self,
        name: &str,
        previous: Option<CredentialEntry>,
    ) -> Result<(), MetadataError> {
        if let Err(e) = self.config.save_to(&self.path) {
            match previous {
                Some(entry) => self.config.credentials.insert(name.to_string(), entry),
                None => self.config.credentials.remove(name),
            };
            return Err(MetadataError::WriteFailed {
                name: name.to_string(),
                reason: e.to_string(),
            });
        }
        Ok(())
    }
}

impl MetadataStore for ConfigMetadata {
    fn upsert(
        &mut self,
        name: &str,
        title: Option<&str>,
        attributes: &Attributes,
    ) -> Result<(), MetadataError> {
        let previous = self.config.credentials.get(name).cloned();
        let entry = self.config.credentials.entry(name.to_string()).or_default();

        if !entry.merge(title, attributes) && previous.is_some() {
            debug!(name, "metadata unchanged");
            return Ok(());
        }

        debug!(name, created = previous.is_none(), "metadata merged");
        self.commit(name, previous)
    }

    fn lookup(&self, name: &str) -> Option<&CredentialEntry> {
        self.config.credentials.get(name)
    }

    fn remove(&mut self, name: &str) -> Result<bool, MetadataError> {
        let Some(previous) = self.config.credentials.remove(name) else {
            return Ok(false);
        };
        self.commit(name, Some(previous))?;
        Ok(true)
    }
}
