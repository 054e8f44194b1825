//! Directive type.
//!
//! One import row decoded into a change request for a single secret.

use zeroize::Zeroizing;

use crate::core::types::{Attributes, Labels, SecretName};

/// A decoded change request for one secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Directive {
    row: usize,
    name: SecretName,
    value: Option<Zeroizing<String>>,
    title: Option<String>,
    labels: Labels,
    attributes: Attributes,
}

impl std::fmt::Debug for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Directive")
            .field("row", &self.row)
            .field("name", &self.name)
            .field("value", &self.value.as_ref().map(|_| "<redacted>"))
            .field("title", &self.title)
            .field("labels", &self.labels)
            .field("attributes", &self.attributes)
            .finish()
    }
}

impl Directive {
    /// Create a directive for `name` taken from data row `row` (1-based).
    pub fn new(row: usize, name: impl Into<SecretName>) -> Self {
        Self {
            row,
            name: name.into(),
            value: None,
            title: None,
            labels: Labels::new(),
            attributes: Attributes::new(),
        }
    }

    /// Set the secret value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(Zeroizing::new(value.into()));
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a label.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Add a free-form attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Data row this directive came from (1-based, header excluded).
    pub fn row(&self) -> usize {
        self.row
    }

    /// Logical secret name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Secret value, if the row carried one.
    pub fn value(&self) -> Option<&str> {
        self.value.as_ref().map(|v| v.as_str())
    }

    /// Title, if the row carried one.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Labels to apply remotely.
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Attributes to merge into the metadata store.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

impl std::fmt::Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
