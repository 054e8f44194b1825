//! Single-secret commands.
//!
//! Implements get, set, describe, rm and list against the secret store.

mod describe;
mod set;

use dialoguer::Confirm;
use tracing::info;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::export::{self, LabelFilter};
use crate::core::metadata::{ConfigMetadata, MetadataStore};
use crate::error::Result;

pub use describe::execute as describe;
pub use set::{execute as set, SetArgs};

/// Print a secret's latest value.
pub fn get(name: &str, project: Option<&str>) -> Result<()> {
    let config = Config::load_or_default()?;
    let store = super::open_store(&config, project)?;
    let value = store.access(name)?;
    // Plain output for scripting - no decoration
    println!("{}", value.as_str());
    Ok(())
}

/// Delete a secret and its metadata entry.
pub fn rm(name: &str, yes: bool, project: Option<&str>) -> Result<()> {
    let config = Config::load_or_default()?;
    let store = super::open_store(&config, project)?;

    if !store.exists(name)? {
        return Err(crate::error::StoreError::NotFound(name.to_string()).into());
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {} and all its versions?", output::key(name)))
            .default(false)
            .interact()?;
        if !confirmed {
            output::dimmed("aborted");
            return Ok(());
        }
    }

    info!(name, "deleting secret");
    store.delete(name)?;

    let mut metadata = ConfigMetadata::new(config, Config::config_path());
    if metadata.remove(name)? {
        output::dimmed(&format!("removed metadata for {}", name));
    }

    output::success(&format!("removed: {}", output::key(name)));
    Ok(())
}

/// List secrets, optionally filtered by label.
pub fn list(filters: &[LabelFilter], json: bool, project: Option<&str>) -> Result<()> {
    let config = Config::load_or_default()?;
    let store = super::open_store(&config, project)?;
    let secrets = export::select(store.as_ref(), filters)?;
    let metadata = ConfigMetadata::new(config, Config::config_path());

    if json {
        let items: Vec<serde_json::Value> = secrets
            .iter()
            .map(|s| {
                serde_json::json!({
                    "name": s.name,
                    "title": metadata.lookup(&s.name).and_then(|e| e.title.clone()),
                    "labels": s.labels,
                    "created": s.created.map(|c| c.to_rfc3339()),
                })
            })
            .collect();
        let result = serde_json::json!({
            "secrets": items,
            "count": secrets.len()
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if secrets.is_empty() {
        output::dimmed("no secrets found");
    } else {
        output::section(&format!("{} secrets", secrets.len()));
        for secret in &secrets {
            let title = metadata
                .lookup(&secret.name)
                .and_then(|e| e.title.clone())
                .unwrap_or_default();
            println!("  {}  {}", output::key(&secret.name), title);
        }
    }

    Ok(())
}
