//! Configuration file management.
//!
//! Handles reading, writing, and validating `.lockbox.toml`, which holds the
//! default project, the naming prefix, and credential metadata entries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::domain::CredentialEntry;
use crate::core::types::SecretName;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `.lockbox.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Settings section
    pub lockbox: Meta,
    /// Metadata entries keyed by logical secret name
    #[serde(default)]
    pub credentials: BTreeMap<SecretName, CredentialEntry>,
}

/// Settings section of the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    /// Configuration version
    pub version: String,
    /// Default GCP project ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Prefix the secret store prepends to every secret ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

/// User-level defaults stored under the platform config directory.
#[derive(Debug, Default, Deserialize)]
pub struct UserConfig {
    /// Fallback GCP project ID
    #[serde(default)]
    pub project: Option<String>,
}

impl Config {
    /// Create a new empty configuration with current version
    pub fn new() -> Self {
        Self {
            lockbox: Meta {
                version: env!("CARGO_PKG_VERSION").to_string(),
                project: None,
                prefix: None,
            },
            credentials: BTreeMap::new(),
        }
    }

    /// Path to the configuration file in the current directory
    pub fn config_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Check if a configuration file exists in the current directory
    pub fn exists() -> bool {
        Self::config_path().exists()
    }

    /// Load configuration from `.lockbox.toml`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotInitialized` if the file doesn't exist,
    /// or `ConfigError::Parse` if the TOML is malformed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load `.lockbox.toml` if present, otherwise start from an empty config.
    pub fn load_or_default() -> Result<Self> {
        if Self::exists() {
            Self::load()
        } else {
            debug!("no config file, using defaults");
            Ok(Self::new())
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            return Err(ConfigError::NotInitialized.into());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(credentials = config.credentials.len(), "config loaded");

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to `.lockbox.toml`
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file write fails.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "saving config");

        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Naming prefix, empty when unset.
    pub fn prefix(&self) -> &str {
        self.lockbox.prefix.as_deref().unwrap_or("")
    }

    /// Validate the configuration structure and contents
    ///
    /// Checks:
    /// - Version field looks like semver
    /// - Project ID, when set, is non-empty
    /// - Prefix only uses characters allowed in secret IDs
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` or `ConfigError::MissingField` on validation failure.
    pub fn validate(&self) -> Result<()> {
        debug!("validating config");

        if self.lockbox.version.is_empty() {
            return Err(ConfigError::MissingField { field: "version" }.into());
        }

        let version_parts: Vec<&str> = self.lockbox.version.split('.').collect();
        if version_parts.len() < 2 {
            return Err(ConfigError::InvalidValue {
                field: "version",
                reason: format!("not a valid semver: {}", self.lockbox.version),
            }
            .into());
        }

        if let Some(project) = &self.lockbox.project {
            if project.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "project",
                    reason: "empty project id".to_string(),
                }
                .into());
            }
        }

        if let Some(ch) = self
            .prefix()
            .chars()
            .find(|ch| !ch.is_ascii_alphanumeric() && *ch != '_' && *ch != '-')
        {
            return Err(ConfigError::InvalidValue {
                field: "prefix",
                reason: format!(
                    "invalid character '{}'. Only A-Z, a-z, 0-9, '-' and '_' are allowed",
                    ch
                ),
            }
            .into());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl UserConfig {
    /// Path to the user-level config file, if the platform has a config dir.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(constants::USER_CONFIG_DIR)
                .join(constants::USER_CONFIG_FILE)
        })
    }

    /// Load the user-level config, treating a missing file as empty.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
                Ok(toml::from_str(&contents).map_err(ConfigError::Parse)?)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// Resolve the GCP project to operate on.
///
/// Order: explicit flag (or `LOCKBOX_PROJECT`), project config, user config.
///
/// # Errors
///
/// Returns `ConfigError::NoProject` when nothing in the chain names a project.
pub fn resolve_project(flag: Option<&str>, config: &Config) -> Result<String> {
    if let Some(project) = flag.filter(|p| !p.trim().is_empty()) {
        debug!(project, "project from flag");
        return Ok(project.to_string());
    }

    if let Some(project) = &config.lockbox.project {
        debug!(project = %project, "project from .lockbox.toml");
        return Ok(project.clone());
    }

    if let Some(project) = UserConfig::load()?.project {
        debug!(project = %project, "project from user config");
        return Ok(project);
    }

    Err(ConfigError::NoProject.into())
}
