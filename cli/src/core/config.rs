//! # rootgen Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/rootgen
//!
//! ## Overview
//!
//! This module loads, merges and validates rootgen configuration. The config
//! supplies default parameter values (`[context]`) and generation settings
//! (`[generate]`); command-line flags take precedence over all of it.
//!
//! ## Sources
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.rootgen.toml` in the current directory or an ancestor
//!    (the search stops at a directory containing `.git`).
//! 2. The file named by `ROOTGEN_CONFIG`, or else the user file
//!    `<config dir>/rootgen/config.toml`.
//! 3. Default values defined in the code.
//!
//! `[context]` tables are deep-merged so a project can add or override single
//! keys. `[generate]` values from the project replace the user's when they
//! differ from the defaults.
//!
//! ## Example
//!
//! ```toml
//! [context]
//! author = "Christi Mahu"
//! [context.user]
//! email = "christi@example.com"
//!
//! [generate]
//! skip_dirs = ["node_modules", "target", "dist"]
//! into = "~/scratch"
//! ```
//!
use crate::core::context::merge_tables;
use crate::core::error::{Result, RootgenError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use toml::Table;
use tracing::{debug, info};

/// Environment variable naming an explicit user configuration file.
pub const CONFIG_ENV_VAR: &str = "ROOTGEN_CONFIG";
const PROJECT_CONFIG_FILENAME: &str = ".rootgen.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default parameter values for substitution.
    #[serde(default)]
    pub context: Table,
    #[serde(default)]
    pub generate: GenerateConfig,
}

/// Settings for `rootgen generate`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GenerateConfig {
    /// Directory names never entered while looking for template roots.
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,
    /// Default target directory (can use ~). `--into` overrides it.
    #[serde(default)]
    pub into: Option<String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            skip_dirs: default_skip_dirs(),
            into: None,
        }
    }
}

fn default_skip_dirs() -> Vec<String> {
    vec!["node_modules".to_string(), "target".to_string()]
}

/// Loads the merged configuration for the current working directory.
pub fn load_config() -> Result<Config> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let user_path = match env::var_os(CONFIG_ENV_VAR) {
        Some(path) => Some(UserConfig::Explicit(PathBuf::from(path))),
        None => default_user_config_path().map(UserConfig::Default),
    };
    load_config_from(&cwd, user_path)
}

/// Where the user-level config comes from.
#[derive(Debug, Clone)]
pub enum UserConfig {
    /// Named by `ROOTGEN_CONFIG`; must exist.
    Explicit(PathBuf),
    /// The platform default; may be absent.
    Default(PathBuf),
}

/// Loads and merges configuration starting the project search at `start_dir`.
pub fn load_config_from(start_dir: &Path, user: Option<UserConfig>) -> Result<Config> {
    let user_config = load_user_config(user)?;
    let project_config = match find_project_config_path(start_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            Some(load_config_from_path(&path)?)
        }
        None => {
            debug!("No project configuration file (.rootgen.toml) found in current directory or ancestors.");
            None
        }
    };

    let mut merged = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged);
    validate_config(&merged).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged);
    Ok(merged)
}

fn default_user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "rootgen", "rootgen").map(|dirs| dirs.config_dir().join("config.toml"))
}

fn load_user_config(user: Option<UserConfig>) -> Result<Option<Config>> {
    match user {
        Some(UserConfig::Explicit(path)) => {
            info!("Loading configuration from {}: {}", CONFIG_ENV_VAR, path.display());
            load_config_from_path(&path).map(Some)
        }
        Some(UserConfig::Default(path)) if path.is_file() => {
            info!("Loading user configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        Some(UserConfig::Default(path)) => {
            debug!("User configuration file not found at {}", path.display());
            Ok(None)
        }
        None => {
            debug!("Could not determine user config directory.");
            Ok(None)
        }
    }
}

fn find_project_config_path(start_dir: &Path) -> Option<PathBuf> {
    let mut path = start_dir;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project) = project else {
        return user;
    };

    let mut context = user.context;
    merge_tables(&mut context, &project.context);

    let skip_dirs = if project.generate.skip_dirs != default_skip_dirs() {
        project.generate.skip_dirs
    } else {
        user.generate.skip_dirs
    };

    Config {
        context,
        generate: GenerateConfig {
            skip_dirs,
            into: project.generate.into.or(user.generate.into),
        },
    }
}

fn expand_config_paths(config: &mut Config) {
    if let Some(into) = &config.generate.into {
        let expanded = shellexpand::tilde(into).into_owned();
        debug!("Expanded generate.into: {}", expanded);
        config.generate.into = Some(expanded);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    for dir in &config.generate.skip_dirs {
        if dir.is_empty() || dir.contains(['/', '\\']) {
            return Err(anyhow!(RootgenError::Config(format!(
                "Invalid skip_dirs entry '{}'. Expected a single directory name.",
                dir
            ))));
        }
    }
    if config.generate.into.as_deref() == Some("") {
        return Err(anyhow!(RootgenError::Config(
            "generate.into cannot be empty.".to_string()
        )));
    }
    Ok(())
}
