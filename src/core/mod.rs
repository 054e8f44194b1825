//! Core library components.
//!
//! The reconciliation pipeline (`table` → `directive` → `plan` → `engine`),
//! its export inverse, and the two store seams it runs against.

pub mod config;
pub mod constants;
pub mod directive;
pub mod domain;
pub mod engine;
pub mod export;
pub mod metadata;
pub mod plan;
pub mod store;
pub mod table;
pub mod types;
