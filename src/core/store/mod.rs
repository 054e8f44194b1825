//! Secret store access.
//!
//! The reconciler talks to the remote secret service only through the
//! `SecretStore` trait, using logical names. Naming policy (the configured
//! prefix), authentication and retries belong to the implementations.
//!
//! ## Adding a New Store
//!
//! 1. Implement the `SecretStore` trait
//! 2. Add the implementation in a new file (e.g., `aws.rs`)
//! 3. Select it from `backend::open`
//!
//! ## Example
//!
//! ```ignore
//! struct Aws { /* ... */ }
//!
//! impl SecretStore for Aws {
//!     fn name(&self) -> &'static str { "aws" }
//!     fn exists(&self, name: &str) -> Result<bool, StoreError> {
//!         // Look the secret up
//!     }
//!     // ...
//! }
//! ```

use zeroize::Zeroizing;

use crate::core::domain::RemoteSecret;
use crate::core::types::Labels;
use crate::error::StoreError;

mod backend;
#[cfg(feature = "test-store")]
mod fixture;
mod gcloud;
mod memory;

pub use backend::open;
#[cfg(feature = "test-store")]
pub use fixture::Fixture;
pub use gcloud::Gcloud;
pub use memory::{Call, Memory};

/// Remote secret store.
///
/// Every call is synchronous and blocking. Errors are returned as values so
/// the caller can record them per row and carry on.
pub trait SecretStore {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Whether a secret with this name exists.
    ///
    /// A missing secret is `Ok(false)`, not an error.
    fn exists(&self, name: &str) -> Result<bool, StoreError>;

    /// Create a secret with its first version and optional labels.
    fn create(&self, name: &str, value: &str, labels: &Labels) -> Result<(), StoreError>;

    /// Add a new version to an existing secret.
    fn add_version(&self, name: &str, value: &str) -> Result<(), StoreError>;

    /// Add or overwrite labels on an existing secret.
    ///
    /// Labels not named in `labels` are left alone.
    fn set_labels(&self, name: &str, labels: &Labels) -> Result<(), StoreError>;

    /// List every secret visible under the naming policy.
    fn list(&self) -> Result<Vec<RemoteSecret>, StoreError>;

    /// Read the latest version's value.
    fn access(&self, name: &str) -> Result<Zeroizing<String>, StoreError>;

    /// Delete a secret and all its versions.
    fn delete(&self, name: &str) -> Result<(), StoreError>;
}
