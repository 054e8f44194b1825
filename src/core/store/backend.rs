//! Secret store selection.
//!
//! Production builds always talk to Secret Manager through `gcloud`. Builds
//! with the `test-store` feature switch to a JSON fixture file when
//! `LOCKBOX_TEST_STORE` is set.

use tracing::info;

use super::{Gcloud, SecretStore};
use crate::core::config::{self, Config};
use crate::error::Result;

/// Open the secret store for this invocation.
///
/// # Arguments
///
/// * `config` - Loaded project configuration (supplies the naming prefix)
/// * `project` - Project from `--project` / `LOCKBOX_PROJECT`, if given
///
/// # Errors
///
/// Returns `ConfigError::NoProject` when no project can be resolved, or
/// `StoreError::CliMissing` when `gcloud` is not installed.
pub fn open(config: &Config, project: Option<&str>) -> Result<Box<dyn SecretStore>> {
    #[cfg(feature = "test-store")]
    {
        if let Ok(path) = std::env::var(crate::core::constants::TEST_STORE_ENV) {
            info!(path = %path, "using fixture secret store");
            return Ok(Box::new(super::Fixture::open(path)?));
        }
    }

    let project = config::resolve_project(project, config)?;
    info!(project = %project, prefix = config.prefix(), "using gcloud secret store");
    Ok(Box::new(Gcloud::new(project, config.prefix())?))
}
