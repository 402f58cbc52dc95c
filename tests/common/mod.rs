//! Common test utilities for eduplan integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't pollute
//! the user's real data directory.

#![allow(dead_code)]

use assert_cmd::Command;
pub use tempfile::TempDir;

/// A test environment with isolated data storage.
///
/// Each `TestEnv` creates a temporary data directory and the `ep()`
/// method returns a `Command` that sets `EP_DATA_DIR` per-invocation,
/// making tests parallel-safe.
pub struct TestEnv {
    pub data_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with an isolated data directory.
    pub fn new() -> Self {
        Self {
            data_dir: TempDir::new().unwrap(),
        }
    }

    /// Create a new test environment with a registered, logged-in account
    /// ("alice" / "a@x.com" / "pw1").
    pub fn with_alice() -> Self {
        let env = Self::new();
        env.ep()
            .args(["register", "alice", "a@x.com", "--password", "pw1"])
            .assert()
            .success();
        env
    }

    /// Get a Command for the ep binary with the isolated data directory.
    pub fn ep(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_ep"));
        cmd.env("EP_DATA_DIR", self.data_dir.path());
        cmd
    }

    /// Get the path to the data directory.
    pub fn data_path(&self) -> &std::path::Path {
        self.data_dir.path()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
