//! Outcome and report types.
//!
//! The result of applying (or simulating) a plan, one outcome per row.

use crate::core::domain::{Action, Mode};
use crate::error::{MetadataError, StoreError};

/// What happened to a row's metadata entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataSync {
    /// Sync not requested, or the row was skipped or failed.
    Untouched,
    /// Dry run: the entry would have been merged.
    WouldMerge,
    /// The entry was merged and saved.
    Merged,
    /// The secret was applied but the metadata write failed.
    Failed(MetadataError),
}

/// Result of one plan entry.
#[derive(Debug, Clone)]
pub struct Outcome {
    row: usize,
    name: String,
    action: Action,
    reason: Option<String>,
    error: Option<StoreError>,
    metadata: MetadataSync,
}

impl Outcome {
    /// A successful (or simulated) outcome.
    pub fn applied(row: usize, name: impl Into<String>, action: Action) -> Self {
        Self {
            row,
            name: name.into(),
            action,
            reason: None,
            error: None,
            metadata: MetadataSync::Untouched,
        }
    }

    /// A skipped outcome with the planner's reason.
    pub fn skipped(row: usize, name: impl Into<String>, reason: Option<String>) -> Self {
        Self {
            reason,
            ..Self::applied(row, name, Action::Skip)
        }
    }

    /// A failed outcome carrying the store error.
    pub fn failed(row: usize, name: impl Into<String>, action: Action, error: StoreError) -> Self {
        Self {
            error: Some(error),
            ..Self::applied(row, name, action)
        }
    }

    /// Attach the metadata sync result.
    pub fn with_metadata(mut self, metadata: MetadataSync) -> Self {
        self.metadata = metadata;
        self
    }

    /// Data row (1-based).
    pub fn row(&self) -> usize {
        self.row
    }

    /// Logical secret name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Action taken, or that would be taken in a dry run.
    pub fn action(&self) -> Action {
        self.action
    }

    /// Skip reason.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Whether the remote operation succeeded (skips count as success).
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    /// The remote error, if the row failed.
    pub fn error(&self) -> Option<&StoreError> {
        self.error.as_ref()
    }

    /// Metadata sync result.
    pub fn metadata(&self) -> &MetadataSync {
        &self.metadata
    }
}

/// Aggregate result of an import run.
#[derive(Debug, Clone)]
pub struct Report {
    mode: Mode,
    dry_run: bool,
    outcomes: Vec<Outcome>,
}

impl Report {
    /// Create a report from outcomes in row order.
    pub fn new(mode: Mode, dry_run: bool, outcomes: Vec<Outcome>) -> Self {
        Self {
            mode,
            dry_run,
            outcomes,
        }
    }

    /// Mode the run used.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether this was a dry run.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// All outcomes, in row order.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Rows whose create or update succeeded.
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.action != Action::Skip && o.succeeded())
            .count()
    }

    /// Rows whose remote operation failed.
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.succeeded()).count()
    }

    /// Rows skipped by the planner.
    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.action == Action::Skip)
            .count()
    }

    /// Successful rows with the given action.
    pub fn applied(&self, action: Action) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.action == action && o.succeeded())
            .count()
    }

    /// Rows whose metadata write failed.
    pub fn metadata_failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.metadata, MetadataSync::Failed(_)))
            .count()
    }

    /// Whether any row or metadata write failed.
    pub fn has_failures(&self) -> bool {
        self.failed() > 0 || self.metadata_failures() > 0
    }
}
