//! Constants used throughout lockbox.
//!
//! Centralizes magic strings and configuration values.

/// Configuration file name (.lockbox.toml).
pub const CONFIG_FILE: &str = ".lockbox.toml";

/// User-level configuration directory name under the platform config dir.
pub const USER_CONFIG_DIR: &str = "lockbox";

/// User-level configuration file name.
pub const USER_CONFIG_FILE: &str = "config.toml";

/// Environment variable selecting the default project.
pub const PROJECT_ENV: &str = "LOCKBOX_PROJECT";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "LOCKBOX_LOG";

/// Environment variable pointing at a JSON fixture store (test builds only).
pub const TEST_STORE_ENV: &str = "LOCKBOX_TEST_STORE";

/// Reserved column holding the secret name.
pub const NAME_COLUMN: &str = "name";

/// Reserved column holding the secret value.
pub const VALUE_COLUMN: &str = "value";

/// Reserved column holding the human-readable title.
pub const TITLE_COLUMN: &str = "title";

/// Prefix marking a label column (`label:<key>`).
pub const LABEL_PREFIX: &str = "label:";

/// Separator used when rendering list attributes as a single cell.
pub const LIST_SEPARATOR: &str = ";";
