//! Error types.
//!
//! Structural problems with an import document (`TableError`,
//! `DirectiveError`) abort a run before anything is touched. Store and
//! metadata failures are also carried per row inside an import report.

use thiserror::Error;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Directive(#[from] DirectiveError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt failed: {0}")]
    Dialog(#[from] dialoguer::Error),

    #[error("{0}")]
    Other(String),
}

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("not initialized: run `lockbox init` first")]
    NotInitialized,

    #[error("already initialized: .lockbox.toml exists")]
    AlreadyInitialized,

    #[error("failed to read config: {0}")]
    ReadFile(std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("missing field in config: {field}")]
    MissingField { field: &'static str },

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("no project configured")]
    NoProject,
}

/// Structural errors in an import document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("document is empty: a header row is required")]
    MissingHeader,

    #[error("header has no `name` column")]
    MissingNameColumn,

    #[error("column {column} has an empty name")]
    EmptyColumn { column: usize },

    #[error("duplicate column `{name}` at columns {first} and {second}")]
    DuplicateColumn {
        name: String,
        first: usize,
        second: usize,
    },

    #[error("column {column} has an empty label key")]
    EmptyLabelKey { column: usize },

    #[error("duplicate label `{key}` at columns {first} and {second}")]
    DuplicateLabel {
        key: String,
        first: usize,
        second: usize,
    },

    #[error("row {row} has {actual} columns, expected {expected}")]
    WidthMismatch {
        row: usize,
        actual: usize,
        expected: usize,
    },

    #[error("row {row} has an unterminated quoted field")]
    UnterminatedQuote { row: usize },

    #[error("row {row} has a stray character after a quoted field")]
    StrayQuote { row: usize },

    #[error("document is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

/// Row-level errors raised while turning rows into directives.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectiveError {
    #[error("empty name in {}", rows_list(.rows))]
    EmptyNames { rows: Vec<usize> },

    #[error("duplicate name `{name}` in rows {first} and {second}")]
    DuplicateName {
        name: String,
        first: usize,
        second: usize,
    },
}

fn rows_list(rows: &[usize]) -> String {
    let rows: Vec<String> = rows.iter().map(|r| r.to_string()).collect();
    if rows.len() == 1 {
        format!("row {}", rows[0])
    } else {
        format!("rows {}", rows.join(", "))
    }
}

/// Secret store errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("gcloud CLI not found. Install it from https://cloud.google.com/sdk/docs/install")]
    CliMissing,

    #[error("secret not found: {0}")]
    NotFound(String),

    #[error("secret already exists: {0}")]
    AlreadyExists(String),

    #[error("permission denied on {name}: {detail}")]
    PermissionDenied { name: String, detail: String },

    #[error("{op} failed for {name}: {detail}")]
    CommandFailed {
        op: &'static str,
        name: String,
        detail: String,
    },

    #[error("unexpected response from secret store: {0}")]
    Malformed(String),

    #[error("new version added to {name}, but updating labels failed: {cause}")]
    LabelsNotApplied {
        name: String,
        cause: Box<StoreError>,
    },
}

/// Metadata store errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("failed to write metadata for {name}: {reason}")]
    WriteFailed { name: String, reason: String },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
