//! Directive builder.
//!
//! Maps validated rows onto directives: `name`, `value` and `title` columns
//! fill the matching fields, `label:<key>` columns become labels, and every
//! other column becomes a free-form attribute.

use std::collections::HashMap;

use tracing::debug;

use crate::core::constants;
use crate::core::domain::Directive;
use crate::core::table::{self, Header, Row, Table};
use crate::error::{DirectiveError, Result, TableError};

/// What a header column feeds into.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Field {
    Name,
    Value,
    Title,
    Label(String),
    Attribute(String),
}

impl Field {
    fn classify(column: &str, position: usize) -> std::result::Result<Self, TableError> {
        let prefix_len = constants::LABEL_PREFIX.len();

        if column.eq_ignore_ascii_case(constants::NAME_COLUMN) {
            Ok(Self::Name)
        } else if column.eq_ignore_ascii_case(constants::VALUE_COLUMN) {
            Ok(Self::Value)
        } else if column.eq_ignore_ascii_case(constants::TITLE_COLUMN) {
            Ok(Self::Title)
        } else if column.len() >= prefix_len
            && column.is_char_boundary(prefix_len)
            && column[..prefix_len].eq_ignore_ascii_case(constants::LABEL_PREFIX)
        {
            let key = column[prefix_len..].trim();
            if key.is_empty() {
                return Err(TableError::EmptyLabelKey {
                    column: position + 1,
                });
            }
            Ok(Self::Label(key.to_string()))
        } else {
            Ok(Self::Attribute(column.to_string()))
        }
    }
}

/// Column layout derived from a header.
#[derive(Debug)]
pub struct Layout {
    fields: Vec<Field>,
}

impl Layout {
    /// Classify every header column.
    ///
    /// Label keys are trimmed, so `label:env` and `label: env` name the same
    /// label and are rejected together.
    ///
    /// # Errors
    ///
    /// Returns `TableError::EmptyLabelKey` for a bare `label:` column, or
    /// `TableError::DuplicateLabel` when two columns map to one label key.
    pub fn new(header: &Header) -> Result<Self> {
        let mut fields = Vec::with_capacity(header.len());
        let mut labels: HashMap<String, usize> = HashMap::new();

        for (pos, column) in header.columns().iter().enumerate() {
            let field = Field::classify(column, pos)?;
            if let Field::Label(key) = &field {
                if let Some(first) = labels.insert(table::column_key(key), pos) {
                    return Err(TableError::DuplicateLabel {
                        key: key.clone(),
                        first: first + 1,
                        second: pos + 1,
                    }
                    .into());
                }
            }
            fields.push(field);
        }

        Ok(Self { fields })
    }

    /// Build one directive from a row.
    ///
    /// Returns `None` when the trimmed name is empty.
    pub fn build(&self, row: &Row) -> Option<Directive> {
        let mut name = None;
        let mut directive_fields = Vec::with_capacity(self.fields.len());

        for (field, cell) in self.fields.iter().zip(row.cells()) {
            match field {
                Field::Name => name = Some(cell.trim()),
                other => directive_fields.push((other, cell)),
            }
        }

        let name = name.filter(|n| !n.is_empty())?;
        let mut directive = Directive::new(row.number(), name);

        for (field, cell) in directive_fields {
            directive = match field {
                Field::Value => directive.with_value(cell.as_str()),
                Field::Title => directive.with_title(cell.trim()),
                Field::Label(key) => directive.with_label(key.as_str(), cell.as_str()),
                Field::Attribute(key) => directive.with_attribute(key.as_str(), cell.as_str()),
                Field::Name => directive,
            };
        }

        Some(directive)
    }
}

/// Build directives for every row of a table.
///
/// Rows with an empty name are collected and reported together; nothing is
/// returned unless every row is valid and every name is unique.
///
/// # Errors
///
/// Returns `DirectiveError::EmptyNames` listing every offending row, or
/// `DirectiveError::DuplicateName` naming the first conflicting pair.
pub fn build(table: &Table) -> Result<Vec<Directive>> {
    let layout = Layout::new(table.header())?;

    let mut directives = Vec::with_capacity(table.len());
    let mut empty = Vec::new();
    for row in table.rows() {
        match layout.build(row) {
            Some(directive) => directives.push(directive),
            None => empty.push(row.number()),
        }
    }

    if !empty.is_empty() {
        return Err(DirectiveError::EmptyNames { rows: empty }.into());
    }

    check_unique(&directives)?;

    debug!(count = directives.len(), "directives built");
    Ok(directives)
}

fn check_unique(directives: &[Directive]) -> Result<()> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(directives.len());
    for directive in directives {
        if let Some(first) = seen.insert(directive.name(), directive.row()) {
            return Err(DirectiveError::DuplicateName {
                name: directive.name().to_string(),
                first,
                second: directive.row(),
            }
            .into());
        }
    }
    Ok(())
}
