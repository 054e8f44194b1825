//! Describe command - show labels and local metadata for one secret.

use crate::cli::output;
use crate::core::config::Config;
use crate::core::metadata::{ConfigMetadata, MetadataStore};
use crate::error::{Result, StoreError};

/// Show a secret's labels, title and attributes.
pub fn execute(name: &str, project: Option<&str>) -> Result<()> {
    let config = Config::load_or_default()?;
    let store = super::super::open_store(&config, project)?;

    let secret = store
        .list()?
        .into_iter()
        .find(|s| s.name == name)
        .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
    let metadata = ConfigMetadata::new(config, Config::config_path());
    let entry = metadata.lookup(name);

    output::section(&output::key(name));
    if let Some(title) = entry.and_then(|e| e.title.as_deref()) {
        output::kv("title", title);
    }
    if let Some(created) = secret.created {
        output::kv("created", created.format("%Y-%m-%d %H:%M:%S UTC"));
    }

    if !secret.labels.is_empty() {
        output::section("labels");
        for (key, value) in &secret.labels {
            output::kv(key, value);
        }
    }

    if let Some(entry) = entry.filter(|e| !e.attributes.is_empty()) {
        output::section("attributes");
        for (key, value) in &entry.attributes {
            output::kv(key, value);
        }
    }

    Ok(())
}
