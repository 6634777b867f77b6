//! # rootgen Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/rootgen
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the rootgen CLI and the
//! global options they share.
//!
//! ## Commands
//!
//! - `generate` (aliases `gen`, `g`): Scan for template roots and generate
//! - `create` (alias `c`): Write a starter template root
//!
//! Each command defines its own arguments structure and handler function.
//!
//! ## Global Options
//!
//! `GlobalOptions` is flattened into the top-level parser with `global = true`
//! so the flags may appear before or after the command name. The struct is
//! parsed once and passed by reference to the handlers; nothing reads these
//! flags from global state.
//!
use crate::common::ui::Reporter;
use clap::Args;
use std::path::PathBuf;

/// Command for scanning directories and generating from template roots.
pub mod generate;
/// Command for writing a starter template root.
pub mod create;

/// Flags accepted by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Report what would change without touching the filesystem.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Generate into this directory instead of next to each template root.
    #[arg(long, global = true, value_name = "PATH")]
    pub into: Option<PathBuf>,

    /// Suppress all output.
    #[arg(long, global = true)]
    pub silent: bool,

    /// Disable ANSI colors in output.
    #[arg(long, global = true)]
    pub no_colors: bool,
}

impl GlobalOptions {
    /// Builds the reporter configured by these flags.
    pub fn reporter(&self) -> Reporter {
        Reporter::new(self.silent, !self.no_colors)
    }
}
