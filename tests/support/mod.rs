//! Test support utilities for lockbox integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;

#[allow(unused_imports)]
pub use assertions::*;

use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own temporary project dir and home dir. Child
/// processes use `.current_dir()` so tests can run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create a test environment with `.lockbox.toml` for project `demo`.
    pub fn init() -> Self {
        let t = Self::new();
        let output = t.init_cmd();
        assert!(
            output.status.success(),
            "Failed to initialize: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Path of a file inside the project dir.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a file inside the project dir.
    pub fn write(&self, name: &str, contents: &str) {
        fs::write(self.path(name), contents).expect("failed to write file");
    }

    /// Read a file inside the project dir.
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).expect("failed to read file")
    }

    /// Path of the JSON fixture standing in for the remote store.
    pub fn store_path(&self) -> PathBuf {
        self.path("store.json")
    }

    /// Seed the fixture store.
    pub fn seed(&self, state: Value) {
        fs::write(
            self.store_path(),
            serde_json::to_string_pretty(&state).unwrap(),
        )
        .expect("failed to seed store");
    }

    /// Current fixture store contents.
    pub fn store(&self) -> Value {
        let raw = fs::read_to_string(self.store_path()).unwrap_or_else(|_| "{}".to_string());
        serde_json::from_str(&raw).expect("fixture store is not valid JSON")
    }

    /// Versions of one secret in the fixture store, oldest first.
    pub fn versions(&self, name: &str) -> Vec<String> {
        self.store()["secrets"][name]["versions"]
            .as_array()
            .map(|v| {
                v.iter()
                    .filter_map(|s| s.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// One label of one secret in the fixture store.
    pub fn label(&self, name: &str, key: &str) -> Option<String> {
        self.store()["secrets"][name]["labels"][key]
            .as_str()
            .map(str::to_string)
    }

    /// Parsed `.lockbox.toml`.
    pub fn config(&self) -> toml::Value {
        toml::from_str(&self.read(".lockbox.toml")).expect("config is not valid TOML")
    }
}
