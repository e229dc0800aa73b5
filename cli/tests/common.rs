//! # Dockrun Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! Shared helpers for the integration test crates in `cli/tests/`.
//!

// Not every test crate uses every helper.
#![allow(dead_code)]

pub use assert_cmd::Command;

/// Returns a command for the compiled `dockrun` binary with logging
/// environment cleared so output assertions are stable.
pub fn dockrun_cmd() -> Command {
    let mut cmd = Command::cargo_bin("dockrun").expect("Failed to find dockrun binary for testing");
    cmd.env_remove("RUST_LOG").env_remove("DOCKRUN_WAIT_TIMEOUT");
    cmd
}
