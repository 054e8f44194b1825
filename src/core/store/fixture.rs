//! JSON-file secret store for integration tests.
//!
//! Wraps `Memory` and persists its contents to the file named by
//! `LOCKBOX_TEST_STORE` after every mutation, so a test can seed remote
//! state, run the binary, and inspect what it did.

use std::path::{Path, PathBuf};
use tracing::trace;
use zeroize::Zeroizing;

use super::memory::State;
use super::{Memory, SecretStore};
use crate::core::domain::RemoteSecret;
use crate::core::types::Labels;
use crate::error::{Result, StoreError};

/// File-backed store
#[derive(Debug)]
pub struct Fixture {
    path: PathBuf,
    inner: Memory,
}

impl Fixture {
    /// Open the fixture at `path`; a missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state: State = if path.exists() {
            serde_json::from_str(&std::fs::read_to_string(&path)?)?
        } else {
            State::default()
        };

        Ok(Self {
            path,
            inner: Memory::from_state(state),
        })
    }

    fn persist(&self, name: &str) -> std::result::Result<(), StoreError> {
        trace!(path = %self.path.display(), "persisting fixture store");
        let json = serde_json::to_string_pretty(&self.inner.state())
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| StoreError::CommandFailed {
            op: "persist",
            name: name.to_string(),
            detail: e.to_string(),
        })
    }
}

impl SecretStore for Fixture {
    fn name(&self) -> &'static str {
        "fixture"
    }

    fn exists(&self, name: &str) -> std::result::Result<bool, StoreError> {
        self.inner.exists(name)
    }

    fn create(
        &self,
        name: &str,
        value: &str,
        labels: &Labels,
    ) -> std::result::Result<(), StoreError> {
        self.inner.create(name, value, labels)?;
        self.persist(name)
    }

    fn add_version(&self, name: &str, value: &str) -> std::result::Result<(), StoreError> {
        self.inner.add_version(name, value)?;
        self.persist(name)
    }

    fn set_labels(&self, name: &str, labels: &Labels) -> std::result::Result<(), StoreError> {
        self.inner.set_labels(name, labels)?;
        self.persist(name)
    }

    fn list(&self) -> std::result::Result<Vec<RemoteSecret>, StoreError> {
        self.inner.list()
    }

    fn access(&self, name: &str) -> std::result::Result<Zeroizing<String>, StoreError> {
        self.inner.access(name)
    }

    fn delete(&self, name: &str) -> std::result::Result<(), StoreError> {
        self.inner.delete(name)?;
        self.persist(name)
    }
}
