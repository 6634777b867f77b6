//! # rootgen Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/rootgen
//!
//! ## Overview
//!
//! Shared building blocks used by the commands and the generation engine.
//! Nothing in here knows about template roots; these are the filesystem,
//! network and terminal-output seams the engine is built on.
//!
//! ```rust
//! use crate::common::fs::{io, path::FileRef};
//! use crate::common::ui::Reporter;
//!
//! # fn run_example() -> crate::core::error::Result<()> {
//! let reporter = Reporter::new(false, true);
//! let target = FileRef::parts("out", "hello.txt");
//! reporter.log_change(&target, false);
//! io::write(&target, "hello\n")?;
//! # Ok(())
//! # }
//! ```
//!

/// Filesystem utilities (path normalization, safe read/write/remove).
pub mod fs;
/// Remote resource retrieval for `[[fetch]]` entries.
pub mod network;
/// Terminal reporting of changes and errors.
pub mod ui;
