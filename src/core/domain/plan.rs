//! Plan types.
//!
//! A plan pairs every directive with the action the reconciler decided on.

use std::fmt;

use crate::core::domain::Directive;

/// How an import treats secrets that already exist (or don't).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Create missing secrets, skip existing ones.
    #[default]
    Create,
    /// Add versions to existing secrets, skip missing ones.
    Update,
    /// Create missing secrets, update existing ones.
    Upsert,
}

impl Mode {
    /// Pick the mode from the `--update` / `--upsert` import flags.
    pub fn from_flags(update: bool, upsert: bool) -> Self {
        match (update, upsert) {
            (_, true) => Self::Upsert,
            (true, false) => Self::Update,
            (false, false) => Self::Create,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create-only"),
            Self::Update => write!(f, "update-only"),
            Self::Upsert => write!(f, "upsert"),
        }
    }
}

/// The decided action for one directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Skip,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// A directive paired with its decided action.
#[derive(Debug, Clone)]
pub struct PlanEntry {
    directive: Directive,
    action: Action,
    reason: Option<String>,
}

impl PlanEntry {
    /// Create a new plan entry.
    pub fn new(directive: Directive, action: Action, reason: Option<String>) -> Self {
        Self {
            directive,
            action,
            reason,
        }
    }

    /// The directive being applied.
    pub fn directive(&self) -> &Directive {
        &self.directive
    }

    /// The decided action.
    pub fn action(&self) -> Action {
        self.action
    }

    /// Why the entry is skipped.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

/// An ordered list of plan entries, one per input row.
#[derive(Debug, Clone)]
pub struct Plan {
    mode: Mode,
    entries: Vec<PlanEntry>,
}

impl Plan {
    /// Create a plan from entries in input order.
    pub fn new(mode: Mode, entries: Vec<PlanEntry>) -> Self {
        Self { mode, entries }
    }

    /// Mode the plan was computed under.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// All entries, in input row order.
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Consume the plan, yielding its entries.
    pub fn into_entries(self) -> Vec<PlanEntry> {
        self.entries
    }

    /// Number of entries with the given action.
    pub fn count(&self, action: Action) -> usize {
        self.entries.iter().filter(|e| e.action == action).count()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the plan has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
