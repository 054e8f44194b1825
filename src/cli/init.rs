//! Init command - create `.lockbox.toml`.

use tracing::info;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Initialize lockbox in the current directory.
pub fn execute(project: Option<&str>, prefix: Option<String>) -> Result<()> {
    if Config::exists() {
        return Err(ConfigError::AlreadyInitialized.into());
    }

    let mut config = Config::new();
    config.lockbox.project = project.map(str::to_string);
    config.lockbox.prefix = prefix.filter(|p| !p.is_empty());
    config.validate()?;
    config.save()?;

    info!(project = ?config.lockbox.project, prefix = config.prefix(), "initialized");
    output::success(&format!("initialized {}", constants::CONFIG_FILE));
    if config.lockbox.project.is_none() {
        output::hint("no project set; pass --project or set LOCKBOX_PROJECT");
    }
    Ok(())
}
