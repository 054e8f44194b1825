//! Lockbox - team secrets on Google Cloud Secret Manager.
//!
//! Secrets live in Secret Manager; titles and free-form attributes live in a
//! committed `.lockbox.toml`. Bulk changes go through a CSV import that
//! plans every row before touching anything.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/               # Command-line interface
//! │   ├── import         # CSV bulk import
//! │   ├── export         # CSV export
//! │   ├── secrets        # get / set / list / describe / rm
//! │   └── output         # Terminal output helpers
//! └── core/              # Core library components
//!     ├── config         # .lockbox.toml management
//!     ├── table          # CSV parsing and validation
//!     ├── directive      # Rows to change requests
//!     ├── plan           # Create / update / skip decisions
//!     ├── engine         # Plan execution and reporting
//!     ├── export         # CSV export
//!     ├── metadata       # Metadata store (config-backed)
//!     └── store/         # Secret stores
//!         ├── gcloud     # Secret Manager via gcloud
//!         └── memory     # In-process store
//! ```
//!
//! # Import pipeline
//!
//! ```ignore
//! use lockbox::core::domain::Mode;
//! use lockbox::core::engine::{Engine, Options};
//!
//! let mut engine = Engine::new(&store, &mut metadata, Options::default());
//! let report = engine.import(csv.as_bytes(), Mode::Upsert)?;
//! println!("{} failed", report.failed());
//! ```

pub mod cli;
pub mod core;
pub mod error;
