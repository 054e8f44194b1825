//! Reconciliation planner.
//!
//! Planning happens in two steps. `Existence::fetch` asks the secret store
//! about each distinct name once; `plan` then decides every row's action
//! from that snapshot without touching the store again.
//!
//! | Mode   | Exists | Action |
//! |--------|--------|--------|
//! | Create | no     | Create |
//! | Create | yes    | Skip   |
//! | Update | yes    | Update |
//! | Update | no     | Skip   |
//! | Upsert | no     | Create |
//! | Upsert | yes    | Update |

use std::collections::HashMap;

use tracing::debug;

use crate::core::domain::{Action, Directive, Mode, Plan, PlanEntry};
use crate::core::store::SecretStore;
use crate::error::Result;

/// Snapshot of which names exist remotely.
#[derive(Debug, Default, Clone)]
pub struct Existence {
    known: HashMap<String, bool>,
}

impl Existence {
    /// Query the store once per distinct directive name.
    ///
    /// # Errors
    ///
    /// Any lookup failure other than "not found" aborts planning, before
    /// anything has been changed.
    pub fn fetch(store: &dyn SecretStore, directives: &[Directive]) -> Result<Self> {
        let mut snapshot = Self::default();
        for directive in directives {
            if snapshot.known.contains_key(directive.name()) {
                continue;
            }
            let exists = store.exists(directive.name())?;
            debug!(name = directive.name(), exists, "existence checked");
            snapshot.record(directive.name(), exists);
        }
        Ok(snapshot)
    }

    /// Record a known state for `name`.
    pub fn record(&mut self, name: &str, exists: bool) {
        self.known.insert(name.to_string(), exists);
    }

    /// Whether `name` exists. Unknown names are treated as missing.
    pub fn exists(&self, name: &str) -> bool {
        self.known.get(name).copied().unwrap_or(false)
    }

    /// Number of names checked.
    pub fn len(&self) -> usize {
        self.known.len()
    }

    /// Whether no names were checked.
    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

/// Decide the action for one directive.
pub fn decide(mode: Mode, exists: bool, has_value: bool) -> (Action, Option<String>) {
    let action = match (mode, exists) {
        (Mode::Create, false) | (Mode::Upsert, false) => Action::Create,
        (Mode::Update, true) | (Mode::Upsert, true) => Action::Update,
        (Mode::Create, true) => return skip(format!("already exists, mode={}", mode)),
        (Mode::Update, false) => return skip(format!("does not exist, mode={}", mode)),
    };

    if action == Action::Create && !has_value {
        return skip("no value, cannot create".to_string());
    }

    (action, None)
}

fn skip(reason: String) -> (Action, Option<String>) {
    (Action::Skip, Some(reason))
}

/// Build a plan: one entry per directive, in input order.
pub fn plan(directives: Vec<Directive>, mode: Mode, existence: &Existence) -> Plan {
    let entries = directives
        .into_iter()
        .map(|directive| {
            let (action, reason) = decide(
                mode,
                existence.exists(directive.name()),
                directive.value().is_some(),
            );
            debug!(name = directive.name(), %action, "planned");
            PlanEntry::new(directive, action, reason)
        })
        .collect();

    Plan::new(mode, entries)
}
