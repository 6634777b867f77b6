//! # rootgen CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/rootgen
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and builds its commands through `rootgen_cmd()` or
//! `isolated_cmd()`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;

/// # Get rootgen Command (`rootgen_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `rootgen` binary.
///
/// ## Panics
/// Panics if the `rootgen` binary cannot be found via `Command::cargo_bin`.
pub fn rootgen_cmd() -> Command {
    Command::cargo_bin("rootgen").expect("Failed to find rootgen binary for testing")
}

/// # Get Isolated Command (`isolated_cmd`)
///
/// Like `rootgen_cmd`, but runs inside `dir` with an empty config file from
/// `dir` and colors disabled, so the user's own configuration and
/// environment cannot leak into the test.
pub fn isolated_cmd(dir: &Path) -> Command {
    let config = dir.join("rootgen-test-config.toml");
    fs::write(&config, "").expect("Failed to write test config");

    let mut cmd = rootgen_cmd();
    cmd.current_dir(dir)
        .env("ROOTGEN_CONFIG", &config)
        .env_remove("RUST_LOG")
        .arg("--no-colors");
    cmd
}

/// Writes `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directories");
    }
    fs::write(path, content).expect("Failed to write test file");
}
