//! Export to the tabular format.
//!
//! One row per remote secret: `name`, optional `value`, `title`, a
//! `label:<key>` column for every label key seen across the exported set,
//! then one column per attribute key seen. Documents produced here import
//! back without changes.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::core::constants;
use crate::core::domain::RemoteSecret;
use crate::core::metadata::MetadataStore;
use crate::core::store::SecretStore;
use crate::core::table;
use crate::error::Result;

/// A `label=value` filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFilter {
    key: String,
    value: String,
}

impl LabelFilter {
    /// Whether the secret carries this label with this value.
    pub fn matches(&self, secret: &RemoteSecret) -> bool {
        secret.labels.get(&self.key) == Some(&self.value)
    }
}

impl FromStr for LabelFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => Ok(Self {
                key: key.trim().to_string(),
                value: value.trim().to_string(),
            }),
            _ => Err(format!("expected label=value, got '{}'", s)),
        }
    }
}

impl fmt::Display for LabelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Export options.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Include a `value` column with each secret's latest version
    pub with_values: bool,
    /// Only export secrets matching every filter
    pub filters: Vec<LabelFilter>,
}

/// List remote secrets matching every filter, sorted by name.
pub fn select(store: &dyn SecretStore, filters: &[LabelFilter]) -> Result<Vec<RemoteSecret>> {
    let mut secrets: Vec<RemoteSecret> = store
        .list()?
        .into_iter()
        .filter(|s| filters.iter().all(|f| f.matches(s)))
        .collect();
    secrets.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(secrets)
}

/// Render the export document.
///
/// # Errors
///
/// Returns `StoreError` if listing fails, or if reading a value fails when
/// values were requested.
pub fn export(
    store: &dyn SecretStore,
    metadata: &dyn MetadataStore,
    options: &ExportOptions,
) -> Result<String> {
    let secrets = select(store, &options.filters)?;
    debug!(
        count = secrets.len(),
        with_values = options.with_values,
        "exporting"
    );

    let label_keys = importable(
        secrets
            .iter()
            .flat_map(|s| s.labels.keys().map(String::as_str)),
        |key| key.is_empty(),
        "label",
    );

    let attribute_keys = importable(
        secrets
            .iter()
            .filter_map(|s| metadata.lookup(&s.name))
            .flat_map(|entry| entry.attributes.keys().map(String::as_str)),
        is_reserved,
        "attribute",
    );

    let mut header = vec![constants::NAME_COLUMN.to_string()];
    if options.with_values {
        header.push(constants::VALUE_COLUMN.to_string());
    }
    header.push(constants::TITLE_COLUMN.to_string());
    header.extend(
        label_keys
            .iter()
            .map(|c| format!("{}{}", constants::LABEL_PREFIX, c.name)),
    );
    header.extend(attribute_keys.iter().map(|c| c.name.to_string()));

    let mut out = table::write([&header]);
    for secret in &secrets {
        let entry = metadata.lookup(&secret.name);

        let mut record = vec![secret.name.clone()];
        if options.with_values {
            record.push(store.access(&secret.name)?.to_string());
        }
        record.push(entry.and_then(|e| e.title.clone()).unwrap_or_default());
        record.extend(label_keys.iter().map(|column| {
            column
                .keys
                .iter()
                .find_map(|k| secret.labels.get(*k))
                .cloned()
                .unwrap_or_default()
        }));
        record.extend(attribute_keys.iter().map(|column| {
            entry
                .and_then(|e| column.keys.iter().find_map(|k| e.attribute(k)))
                .unwrap_or_default()
        }));

        out.push_str(&table::write([&record]));
    }

    Ok(out)
}

/// One exported column and the keys that feed it.
#[derive(Debug)]
struct Column<'a> {
    name: &'a str,
    keys: Vec<&'a str>,
}

/// Group keys into header columns the parser can read back, sorted.
///
/// The parser trims column names and treats names equal under
/// `table::column_key` as duplicates. Keys it could not read back are
/// dropped with a warning; keys differing only by case share one column
/// named after the first in sort order.
fn importable<'a>(
    keys: impl Iterator<Item = &'a str>,
    rejected: impl Fn(&str) -> bool,
    kind: &'static str,
) -> Vec<Column<'a>> {
    let sorted: BTreeSet<&str> = keys.collect();
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(sorted.len());
    let mut columns: Vec<Column<'a>> = Vec::with_capacity(sorted.len());

    for key in sorted {
        if key.trim() != key || rejected(key) {
            warn!(key, kind, "cannot round-trip as a column, not exported");
            continue;
        }
        match positions.get(&table::column_key(key)) {
            Some(&pos) => {
                let column = &mut columns[pos];
                warn!(key, kind, into = column.name, "case-only duplicate, merged");
                column.keys.push(key);
            }
            None => {
                positions.insert(table::column_key(key), columns.len());
                columns.push(Column {
                    name: key,
                    keys: vec![key],
                });
            }
        }
    }
    columns
}

fn is_reserved(column: &str) -> bool {
    let key = table::column_key(column);
    key.is_empty()
        || key == constants::NAME_COLUMN
        || key == constants::VALUE_COLUMN
        || key == constants::TITLE_COLUMN
        || key.starts_with(constants::LABEL_PREFIX)
}
