//! Test support utilities for sapper integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with an isolated project directory.
///
/// No process-global state is mutated; child processes use `.current_dir()`
/// so tests can safely run in parallel.
pub struct Test {
    /// Temporary directory holding `.sapper.toml`
    pub dir: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Create a test environment with the fixture keys written to config.
    pub fn with_keys() -> Self {
        let t = Self::new();
        t.write_config(&fixture_config(60));
        t
    }

    /// Create a test environment initialized through `sapper init`.
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

    /// Path of the config file inside the test directory.
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join(".sapper.toml")
    }

    /// Overwrite the config file.
    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.config_path(), contents).expect("failed to write config");
    }

    /// Read the config file.
    pub fn read_config(&self) -> String {
        std::fs::read_to_string(self.config_path()).expect("failed to read config")
    }
}
