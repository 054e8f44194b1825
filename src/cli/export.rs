//! Export command - write secrets and metadata as CSV.

use std::fs;

use tracing::info;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::export::{self, ExportOptions, LabelFilter};
use crate::core::metadata::ConfigMetadata;
use crate::error::Result;

/// Export to `output`, or stdout when no file is given.
pub fn execute(
    output: Option<&str>,
    with_values: bool,
    filters: Vec<LabelFilter>,
    project: Option<&str>,
) -> Result<()> {
    let config = Config::load_or_default()?;
    let store = super::open_store(&config, project)?;
    let metadata = ConfigMetadata::new(config, Config::config_path());

    let options = ExportOptions {
        with_values,
        filters,
    };
    let document = export::export(store.as_ref(), &metadata, &options)?;

    match output {
        Some(path) => {
            fs::write(path, &document)?;

            // Plaintext values on disk: owner-only
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if with_values {
                    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
                }
            }

            info!(path, with_values, "exported");
            output::success(&format!("exported to {}", path));
            if with_values {
                output::warn("file contains plaintext secret values");
            }
        }
        None => output::raw(&document)?,
    }
    Ok(())
}
