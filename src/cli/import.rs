//! Import command - reconcile a CSV document against the secret store.

use std::io::{self, Read};

use tracing::info;

use crate::cli::output::{self, Marker};
use crate::core::config::Config;
use crate::core::directive;
use crate::core::domain::{Action, MetadataSync, Mode, Outcome, Report};
use crate::core::engine::{Engine, Options};
use crate::core::metadata::ConfigMetadata;
use crate::core::table::Table;
use crate::error::{Error, Result};

/// Import flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct Args {
    pub dry_run: bool,
    pub update: bool,
    pub upsert: bool,
    pub update_config: bool,
}

/// Import secrets and metadata from `path` (`-` reads stdin).
pub fn execute(path: &str, args: Args, project: Option<&str>) -> Result<()> {
    let input = read_input(path)?;

    // Structural problems stop the run before the store is contacted.
    let table = Table::parse(&input)?;
    let directives = directive::build(&table)?;
    let mode = Mode::from_flags(args.update, args.upsert);
    info!(path, rows = directives.len(), %mode, "importing");

    let config = Config::load_or_default()?;
    let store = super::open_store(&config, project)?;
    let mut metadata = ConfigMetadata::new(config, Config::config_path());
    let options = Options {
        dry_run: args.dry_run,
        update_config: args.update_config,
    };

    let mut engine = Engine::new(store.as_ref(), &mut metadata, options);
    let plan = engine.plan(directives, mode)?;
    let report = engine.execute(plan);

    render(&report);

    if report.has_failures() {
        return Err(Error::Other(format!(
            "{} row(s) failed, {} metadata write(s) failed",
            report.failed(),
            report.metadata_failures()
        )));
    }
    Ok(())
}

fn read_input(path: &str) -> Result<Vec<u8>> {
    if path == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read(path)?)
}

fn render(report: &Report) {
    if report.outcomes().is_empty() {
        output::dimmed("no rows to import");
        return;
    }

    let title = if report.is_dry_run() {
        format!("dry run ({})", report.mode())
    } else {
        format!("import ({})", report.mode())
    };
    output::section(&title);

    for outcome in report.outcomes() {
        let (marker, detail) = describe(outcome, report.is_dry_run());
        output::row(marker, outcome.name(), &detail);
        if let MetadataSync::Failed(e) = outcome.metadata() {
            output::warn(&format!("row {}: {}", outcome.row(), e));
        }
    }

    println!();
    let mut summary = format!(
        "{} created, {} updated, {} skipped, {} failed",
        report.applied(Action::Create),
        report.applied(Action::Update),
        report.skipped(),
        report.failed()
    );
    if report.metadata_failures() > 0 {
        summary.push_str(&format!(", {} metadata failed", report.metadata_failures()));
    }
    if report.is_dry_run() {
        output::dimmed(&format!("would apply: {} (nothing changed)", summary));
    } else if report.has_failures() {
        output::warn(&summary);
    } else {
        output::success(&summary);
    }
}

fn describe(outcome: &Outcome, dry_run: bool) -> (Marker, String) {
    let row = outcome.row();
    if let Some(e) = outcome.error() {
        let detail = format!("row {}: {} failed: {}", row, outcome.action(), e);
        return (Marker::Fail, detail);
    }

    let mut detail = match outcome.action() {
        Action::Skip => format!(
            "row {}: skip ({})",
            row,
            outcome.reason().unwrap_or("nothing to do")
        ),
        action if dry_run => format!("row {}: would {}", row, action),
        action => format!("row {}: {}", row, action),
    };
    match outcome.metadata() {
        MetadataSync::WouldMerge => detail.push_str(", would merge metadata"),
        MetadataSync::Merged => detail.push_str(", metadata merged"),
        MetadataSync::Failed(_) => detail.push_str(", metadata failed"),
        MetadataSync::Untouched => {}
    }

    let marker = match outcome.action() {
        Action::Create => Marker::Create,
        Action::Update => Marker::Update,
        Action::Skip => Marker::Skip,
    };
    (marker, detail)
}
