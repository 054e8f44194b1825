//! In-process secret store.
//!
//! Keeps secrets in a map and records every call, which makes it the test
//! double for the reconciler. Names added with `deny` fail every mutating
//! call with `PermissionDenied`; names added with `deny_labels` fail only
//! label updates.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use zeroize::Zeroizing;

use super::SecretStore;
use crate::core::domain::RemoteSecret;
use crate::core::types::Labels;
use crate::error::StoreError;

/// A recorded store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Exists(String),
    Create(String),
    AddVersion(String),
    SetLabels(String),
    List,
    Access(String),
    Delete(String),
}

impl Call {
    /// Whether the call changes remote state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::Create(_) | Self::AddVersion(_) | Self::SetLabels(_) | Self::Delete(_)
        )
    }
}

/// A stored secret: its versions (oldest first) and labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stored {
    pub versions: Vec<String>,
    #[serde(default)]
    pub labels: Labels,
}

/// Serializable store contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    #[serde(default)]
    pub secrets: BTreeMap<String, Stored>,
    #[serde(default)]
    pub deny: BTreeSet<String>,
    #[serde(default)]
    pub deny_labels: BTreeSet<String>,
}

/// In-memory secret store.
#[derive(Debug, Default)]
pub struct Memory {
    state: RefCell<State>,
    calls: RefCell<Vec<Call>>,
}

impl Memory {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from existing contents.
    pub fn from_state(state: State) -> Self {
        Self {
            state: RefCell::new(state),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Seed a secret with one version.
    pub fn insert(&self, name: &str, value: &str, labels: Labels) {
        self.state.borrow_mut().secrets.insert(
            name.to_string(),
            Stored {
                versions: vec![value.to_string()],
                labels,
            },
        );
    }

    /// Make every mutating call on `name` fail.
    pub fn deny(&self, name: &str) {
        self.state.borrow_mut().deny.insert(name.to_string());
    }

    /// Make label updates on `name` fail.
    pub fn deny_labels(&self, name: &str) {
        self.state.borrow_mut().deny_labels.insert(name.to_string());
    }

    /// Snapshot of the current contents.
    pub fn state(&self) -> State {
        self.state.borrow().clone()
    }

    /// Snapshot of one secret.
    pub fn get(&self, name: &str) -> Option<Stored> {
        self.state.borrow().secrets.get(name).cloned()
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Whether any mutating call was made.
    pub fn mutated(&self) -> bool {
        self.calls.borrow().iter().any(Call::is_mutation)
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn check_allowed(&self, name: &str) -> Result<(), StoreError> {
        if self.state.borrow().deny.contains(name) {
            return Err(StoreError::PermissionDenied {
                name: name.to_string(),
                detail: "denied by store".to_string(),
            });
        }
        Ok(())
    }
}

impl SecretStore for Memory {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn exists(&self, name: &str) -> Result<bool, StoreError> {
        self.record(Call::Exists(name.to_string()));
        Ok(self.state.borrow().secrets.contains_key(name))
    }

    fn create(&self, name: &str, value: &str, labels: &Labels) -> Result<(), StoreError> {
        self.record(Call::Create(name.to_string()));
        self.check_allowed(name)?;

        let mut state = self.state.borrow_mut();
        if state.secrets.contains_key(name) {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }
        state.secrets.insert(
            name.to_string(),
            Stored {
                versions: vec![value.to_string()],
                labels: labels.clone(),
            },
        );
        Ok(())
    }

    fn add_version(&self, name: &str, value: &str) -> Result<(), StoreError> {
        self.record(Call::AddVersion(name.to_string()));
        self.check_allowed(name)?;

        let mut state = self.state.borrow_mut();
        let stored = state
            .secrets
            .get_mut(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        stored.versions.push(value.to_string());
        Ok(())
    }

    fn set_labels(&self, name: &str, labels: &Labels) -> Result<(), StoreError> {
        self.record(Call::SetLabels(name.to_string()));
        self.check_allowed(name)?;
        if self.state.borrow().deny_labels.contains(name) {
            return Err(StoreError::PermissionDenied {
                name: name.to_string(),
                detail: "label update denied by store".to_string(),
            });
        }

        let mut state = self.state.borrow_mut();
        let stored = state
            .secrets
            .get_mut(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        stored
            .labels
            .extend(labels.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    fn list(&self) -> Result<Vec<RemoteSecret>, StoreError> {
        self.record(Call::List);
        Ok(self
            .state
            .borrow()
            .secrets
            .iter()
            .map(|(name, stored)| RemoteSecret::new(name.clone(), stored.labels.clone()))
            .collect())
    }

    fn access(&self, name: &str) -> Result<Zeroizing<String>, StoreError> {
        self.record(Call::Access(name.to_string()));
        self.state
            .borrow()
            .secrets
            .get(name)
            .and_then(|stored| stored.versions.last())
            .map(|v| Zeroizing::new(v.clone()))
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    fn delete(&self, name: &str) -> Result<(), StoreError> {
        self.record(Call::Delete(name.to_string()));
        self.check_allowed(name)?;

        self.state
            .borrow_mut()
            .secrets
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }
}
