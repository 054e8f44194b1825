//! Credential metadata entry.
//!
//! The non-secret description of a secret kept in `.lockbox.toml`:
//! an optional title plus free-form attributes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::core::constants;
use crate::core::types::Attributes;

/// An attribute value as written in the configuration file.
///
/// Inside the reconciler every value is an opaque string; the richer
/// variants only exist so hand-written config survives a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Text(String),
    Number(serde_json::Number),
    List(Vec<String>),
}

impl AttrValue {
    /// Render the value as a single cell.
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::List(items) => items.join(constants::LIST_SEPARATOR),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Metadata for one secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialEntry {
    /// Human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Everything else on the entry
    #[serde(flatten)]
    pub attributes: BTreeMap<String, AttrValue>,
}

impl CredentialEntry {
    /// Merge incoming fields into this entry.
    ///
    /// The title is replaced only when one is supplied, and only the
    /// supplied attribute keys are written. An incoming string that renders
    /// identically to the stored value leaves the stored value (and its
    /// type) alone. Returns whether anything changed.
    pub fn merge(&mut self, title: Option<&str>, attributes: &Attributes) -> bool {
        let mut changed = false;

        if let Some(title) = title {
            if self.title.as_deref() != Some(title) {
                self.title = Some(title.to_string());
                changed = true;
            }
        }

        for (key, value) in attributes {
            match self.attributes.get(key) {
                Some(existing) if existing.render() == *value => {}
                _ => {
                    self.attributes
                        .insert(key.clone(), AttrValue::Text(value.clone()));
                    changed = true;
                }
            }
        }

        changed
    }

    /// Look up an attribute rendered as a string.
    pub fn attribute(&self, key: &str) -> Option<String> {
        self.attributes.get(key).map(AttrValue::render)
    }
}
