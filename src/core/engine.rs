//! Execution engine.
//!
//! Applies a plan row by row against the secret store and, when asked,
//! merges each applied row's title and attributes into the metadata store.
//! A failing row is recorded and the run moves on; nothing a row does can
//! stop the rows after it.

use tracing::{debug, info, warn};

use crate::core::directive;
use crate::core::domain::{
    Action, Directive, MetadataSync, Mode, Outcome, Plan, PlanEntry, Report,
};
use crate::core::metadata::MetadataStore;
use crate::core::plan::{self, Existence};
use crate::core::store::SecretStore;
use crate::core::table::Table;
use crate::error::{Result, StoreError};

/// Run options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Decide and report, but change nothing
    pub dry_run: bool,
    /// Merge titles and attributes into the metadata store
    pub update_config: bool,
}

/// Applies plans against a secret store and a metadata store.
pub struct Engine<'a> {
    secrets: &'a dyn SecretStore,
    metadata: &'a mut dyn MetadataStore,
    options: Options,
}

impl<'a> Engine<'a> {
    /// Create an engine over the two stores.
    pub fn new(
        secrets: &'a dyn SecretStore,
        metadata: &'a mut dyn MetadataStore,
        options: Options,
    ) -> Self {
        Self {
            secrets,
            metadata,
            options,
        }
    }

    /// Parse, validate, plan and apply a whole import document.
    ///
    /// # Errors
    ///
    /// Structural and directive errors, and existence lookup failures, abort
    /// the run before any change is made. Per-row failures are reported in
    /// the returned `Report` instead.
    pub fn import(&mut self, input: &[u8], mode: Mode) -> Result<Report> {
        let table = Table::parse(input)?;
        let directives = directive::build(&table)?;
        let plan = self.plan(directives, mode)?;
        Ok(self.execute(plan))
    }

    /// Look up remote existence and plan the directives.
    pub fn plan(&self, directives: Vec<Directive>, mode: Mode) -> Result<Plan> {
        let existence = Existence::fetch(self.secrets, &directives)?;
        Ok(plan::plan(directives, mode, &existence))
    }

    /// Apply every plan entry in order.
    pub fn execute(&mut self, plan: Plan) -> Report {
        let mode = plan.mode();
        info!(
            rows = plan.len(),
            %mode,
            dry_run = self.options.dry_run,
            store = self.secrets.name(),
            "executing plan"
        );

        let outcomes = plan
            .into_entries()
            .into_iter()
            .map(|entry| self.apply(entry))
            .collect();

        Report::new(mode, self.options.dry_run, outcomes)
    }

    fn apply(&mut self, entry: PlanEntry) -> Outcome {
        let directive = entry.directive();
        let (row, name, action) = (directive.row(), directive.name(), entry.action());

        if action == Action::Skip {
            debug!(row, name, reason = entry.reason(), "skipped");
            return Outcome::skipped(row, name, entry.reason().map(str::to_string));
        }

        if !self.options.dry_run {
            if let Err(e) = self.apply_remote(directive, action) {
                warn!(row, name, error = %e, "row failed");
                return Outcome::failed(row, name, action, e);
            }
        }

        let metadata = self.sync_metadata(directive);
        Outcome::applied(row, name, action).with_metadata(metadata)
    }

    fn apply_remote(
        &self,
        directive: &Directive,
        action: Action,
    ) -> std::result::Result<(), StoreError> {
        let name = directive.name();
        match action {
            Action::Create => {
                // The planner never creates without a value.
                let value = directive.value().unwrap_or_default();
                self.secrets.create(name, value, directive.labels())
            }
            Action::Update => {
                let versioned = match directive.value() {
                    Some(value) => {
                        self.secrets.add_version(name, value)?;
                        true
                    }
                    None => false,
                };
                if directive.labels().is_empty() {
                    return Ok(());
                }
                // The row still fails, but the report must say the version landed.
                self.secrets
                    .set_labels(name, directive.labels())
                    .map_err(|e| {
                        if versioned {
                            StoreError::LabelsNotApplied {
                                name: name.to_string(),
                                cause: Box::new(e),
                            }
                        } else {
                            e
                        }
                    })
            }
            Action::Skip => Ok(()),
        }
    }

    fn sync_metadata(&mut self, directive: &Directive) -> MetadataSync {
        if !self.options.update_config {
            return MetadataSync::Untouched;
        }
        if self.options.dry_run {
            return MetadataSync::WouldMerge;
        }

        match self
            .metadata
            .upsert(directive.name(), directive.title(), directive.attributes())
        {
            Ok(()) => MetadataSync::Merged,
            Err(e) => {
                warn!(name = directive.name(), error = %e, "metadata write failed");
                MetadataSync::Failed(e)
            }
        }
    }
}
