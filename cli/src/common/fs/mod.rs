//! # rootgen Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/rootgen
//!
//! ## Overview
//!
//! Groups the filesystem helpers used by the generator:
//!
//! - **`path`**: Lexical path normalization and the `FileRef` type that both
//!   readers and writers accept.
//! - **`io`**: Read-or-absent, write-with-parents and removal. The only code
//!   that mutates the target tree.
//!
//! Callers import the specific submodule they need, e.g.
//! `use crate::common::fs::{io, path::FileRef};`.
//!

/// Path normalization and file references.
pub mod path;
/// Safe read/write/remove operations.
pub mod io;
