//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

use std::collections::BTreeMap;

/// A logical secret name, before the store applies any naming prefix.
pub type SecretName = String;

/// A remote label key (the suffix of a `label:<key>` column).
pub type LabelKey = String;

/// Labels attached to a remote secret.
pub type Labels = BTreeMap<LabelKey, String>;

/// Free-form string attributes taken from an import row.
pub type Attributes = BTreeMap<String, String>;
