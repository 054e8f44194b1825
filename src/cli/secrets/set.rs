//! Set command - create or update one secret.
//!
//! A single-row import in upsert mode, so labels and metadata merge the
//! same way they do for a CSV import.

use std::io::{self, IsTerminal, Read};

use dialoguer::Password;
use tracing::info;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::domain::{Action, Directive, Mode};
use crate::core::engine::{Engine, Options};
use crate::core::metadata::ConfigMetadata;
use crate::error::{Error, Result};

/// Optional metadata for `set`.
#[derive(Debug, Default)]
pub struct SetArgs {
    pub title: Option<String>,
    pub labels: Vec<(String, String)>,
    pub attributes: Vec<(String, String)>,
}

/// Create or update `name`.
pub fn execute(
    name: &str,
    value: Option<String>,
    args: SetArgs,
    project: Option<&str>,
) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Other("secret name cannot be empty".to_string()));
    }
    info!(name, "setting secret");

    let value = match value {
        Some(v) => Zeroizing::new(v),
        None => read_value(name)?,
    };
    if value.is_empty() {
        return Err(Error::Other("value cannot be empty".to_string()));
    }

    let update_config = args.title.is_some() || !args.attributes.is_empty();
    let mut directive = Directive::new(1, name).with_value(value.as_str());
    if let Some(title) = args.title {
        directive = directive.with_title(title);
    }
    for (key, value) in args.labels {
        directive = directive.with_label(key, value);
    }
    for (key, value) in args.attributes {
        directive = directive.with_attribute(key, value);
    }

    let config = Config::load_or_default()?;
    let store = super::super::open_store(&config, project)?;
    let mut metadata = ConfigMetadata::new(config, Config::config_path());
    let options = Options {
        dry_run: false,
        update_config,
    };

    let mut engine = Engine::new(store.as_ref(), &mut metadata, options);
    let plan = engine.plan(vec![directive], Mode::Upsert)?;
    let report = engine.execute(plan);

    let Some(outcome) = report.outcomes().first() else {
        return Ok(());
    };
    if let Some(e) = outcome.error() {
        return Err(e.clone().into());
    }
    let verb = match outcome.action() {
        Action::Create => "created",
        _ => "updated",
    };
    output::success(&format!("{} {}", verb, output::key(name)));
    if report.metadata_failures() > 0 {
        return Err(Error::Other(format!("secret {} but metadata was not saved", verb)));
    }
    Ok(())
}

/// Read the value from piped stdin, or prompt with hidden input.
fn read_value(name: &str) -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        let mut input = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut input)?;
        let trimmed = input.trim_end_matches(['\n', '\r']).len();
        input.truncate(trimmed);
        return Ok(input);
    }

    let value = Password::new()
        .with_prompt(format!("Value for {}", output::key(name)))
        .interact()?;
    Ok(Zeroizing::new(value))
}
