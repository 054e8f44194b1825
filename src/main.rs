//! Lockbox - bulk secrets and metadata for Google Cloud Secret Manager.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lockbox::cli::output;
use lockbox::cli::{execute, Cli};
use lockbox::core::constants;
use lockbox::error::{ConfigError, Error, StoreError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("lockbox=debug")
        } else {
            EnvFilter::new("lockbox=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.project) {
        let suggestion = match &e {
            Error::Config(ConfigError::NotInitialized) => Some("run: lockbox init"),
            Error::Config(ConfigError::NoProject) => {
                Some("pass --project or set LOCKBOX_PROJECT")
            }
            Error::Store(StoreError::CliMissing) => {
                Some("install the Google Cloud SDK and run: gcloud auth login")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
