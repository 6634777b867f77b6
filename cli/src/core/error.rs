//! # rootgen Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/rootgen
//!
//! ## Overview
//!
//! This module defines the error types used throughout rootgen. Errors are
//! split into two layers:
//! - `RootgenError`: A `thiserror` enum naming the failure domains the
//!   application distinguishes (configuration, filesystem, template roots,
//!   remote fetches, arguments).
//! - `Result<T>`: An alias for `anyhow::Result<T>` so call sites can attach
//!   context with `anyhow::Context` while still wrapping a `RootgenError`.
//!
//! ## Propagation
//!
//! Generation is partial-failure tolerant. A failing entry (a file that cannot
//! be written, a fetch that returns a 404) is recorded in the run summary and
//! the engine moves on to its siblings. Only startup failures, such as a
//! search directory that does not exist or a broken configuration file,
//! propagate all the way to `main` and abort the run.
//!
//! ## Examples
//!
//! ```rust
//! if !path.is_dir() {
//!     anyhow::bail!(RootgenError::FileSystem(format!(
//!         "Search path is not a directory: {}",
//!         path.display()
//!     )));
//! }
//!
//! let text = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read descriptor: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for the rootgen application.
#[derive(Error, Debug)]
pub enum RootgenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    /// A `.templateroot` directory whose descriptor is missing or malformed.
    #[error("Invalid template root '{path}': {reason}")]
    TemplateRoot { path: String, reason: String },

    #[error("Fetching '{url}' failed: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
