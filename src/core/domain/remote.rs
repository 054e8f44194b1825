//! Remote secret listing entry.

use chrono::{DateTime, Utc};

use crate::core::types::{Labels, SecretName};

/// A secret as reported by the secret store's list operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSecret {
    /// Logical name (store prefix removed)
    pub name: SecretName,
    /// Labels attached to the secret
    pub labels: Labels,
    /// Creation time, when the store reports one
    pub created: Option<DateTime<Utc>>,
}

impl RemoteSecret {
    /// Create a listing entry without a creation time.
    pub fn new(name: impl Into<SecretName>, labels: Labels) -> Self {
        Self {
            name: name.into(),
            labels,
            created: None,
        }
    }
}
