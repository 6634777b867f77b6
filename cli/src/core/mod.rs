//! # rootgen Core
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/rootgen
//!
//! ## Overview
//!
//! This module aggregates the generation engine and the infrastructure it
//! depends on.
//!
//! ## Architecture
//!
//! - `config`: Configuration loading, merging and validation
//! - `error`: Error types and the crate-wide `Result` alias
//! - `context`: The parameter mapping used for substitution
//! - `templating`: `_token_` substitution in text and paths
//! - `diff`: Line-ending-insensitive content comparison
//! - `template_root`: Template-root descriptors, discovery and entries
//! - `generator`: The diff-aware generation engine
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{RootgenError, Result}; // For error handling
//! use crate::core::generator::{GenerateOptions, Generator};
//! ```
//!
pub mod config;
pub mod context;
pub mod diff;
pub mod error;
pub mod generator;
pub mod template_root;
pub mod templating;
