//! Command-line interface.

pub mod completions;
pub mod export;
pub mod import;
pub mod init;
pub mod output;
pub mod secrets;

use clap::{Parser, Subcommand};

use crate::core::config::Config;
use crate::core::constants;
use crate::core::export::LabelFilter;
use crate::core::store::{self, SecretStore};
use crate::error::Result;

/// Lockbox - team secrets on Google Cloud Secret Manager.
#[derive(Parser)]
#[command(
    name = "lockbox",
    about = "Team secrets on Google Cloud Secret Manager",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// GCP project (defaults to .lockbox.toml, then the user config)
    #[arg(long, global = true, env = constants::PROJECT_ENV)]
    pub project: Option<String>,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize lockbox in the current directory
    Init {
        /// Prefix applied to every secret ID
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Import secrets and metadata from a CSV file
    Import {
        /// Path to the CSV file ("-" for stdin)
        path: String,
        /// Show what would change without changing anything
        #[arg(long)]
        dry_run: bool,
        /// Only update existing secrets
        #[arg(long, conflicts_with = "upsert")]
        update: bool,
        /// Create missing secrets and update existing ones
        #[arg(long)]
        upsert: bool,
        /// Merge titles and attributes into .lockbox.toml
        #[arg(long)]
        update_config: bool,
    },

    /// Export secrets and metadata as CSV
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
        /// Include secret values
        #[arg(long)]
        with_values: bool,
        /// Only export secrets with this label (label=value, repeatable)
        #[arg(long = "filter", value_name = "LABEL=VALUE")]
        filters: Vec<LabelFilter>,
    },

    /// List secrets
    List {
        /// Only list secrets with this label (label=value, repeatable)
        #[arg(long = "filter", value_name = "LABEL=VALUE")]
        filters: Vec<LabelFilter>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a secret's latest value
    Get {
        /// Secret name
        name: String,
    },

    /// Create or update a secret
    Set {
        /// Secret name
        name: String,
        /// Secret value (read from stdin or prompted when omitted)
        value: Option<String>,
        /// Title stored in .lockbox.toml
        #[arg(long)]
        title: Option<String>,
        /// Label to apply (key=value, repeatable)
        #[arg(long = "label", value_name = "KEY=VALUE", value_parser = parse_pair)]
        labels: Vec<(String, String)>,
        /// Attribute stored in .lockbox.toml (key=value, repeatable)
        #[arg(long = "attr", value_name = "KEY=VALUE", value_parser = parse_pair)]
        attributes: Vec<(String, String)>,
    },

    /// Show a secret's metadata and labels
    Describe {
        /// Secret name
        name: String,
    },

    /// Delete a secret and its metadata
    Rm {
        /// Secret name
        name: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Parse a `key=value` argument.
fn parse_pair(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{}'", s)),
    }
}

/// Open the secret store for a command.
fn open_store(config: &Config, project: Option<&str>) -> Result<Box<dyn SecretStore>> {
    store::open(config, project)
}

/// Execute a command.
pub fn execute(command: Command, project: Option<String>) -> Result<()> {
    use Command::*;

    let project = project.as_deref();
    match command {
        Init { prefix } => init::execute(project, prefix),
        Import {
            path,
            dry_run,
            update,
            upsert,
            update_config,
        } => import::execute(
            &path,
            import::Args {
                dry_run,
                update,
                upsert,
                update_config,
            },
            project,
        ),
        Export {
            output,
            with_values,
            filters,
        } => export::execute(output.as_deref(), with_values, filters, project),
        List { filters, json } => secrets::list(&filters, json, project),
        Get { name } => secrets::get(&name, project),
        Set {
            name,
            value,
            title,
            labels,
            attributes,
        } => secrets::set(
            &name,
            value,
            secrets::SetArgs {
                title,
                labels,
                attributes,
            },
            project,
        ),
        Describe { name } => secrets::describe(&name, project),
        Rm { name, yes } => secrets::rm(&name, yes, project),
        Completions { shell } => completions::execute(shell),
    }
}
