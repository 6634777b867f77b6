//! # rootgen Generate Command
//!
//! File: cli/src/commands/generate.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/rootgen
//!
//! ## Overview
//!
//! This module implements `rootgen generate` (aliases `gen`, `g`). It wires
//! configuration, context assembly and the fetcher into the generation
//! engine, then reports a one-line summary.
//!
//! ## Architecture
//!
//! The command flow follows these steps:
//! 1. Load configuration (`core::config`)
//! 2. Resolve the search directory; a missing directory aborts the run
//! 3. Build `GenerateOptions` from the global flags and `[generate]` config
//! 4. Assemble the run context: config `[context]`, then `ROOTGEN_VAR_*`
//!    environment variables, then `--var` flags
//! 5. Run the generator and print the summary
//! 6. Return an error when any entry failed, so the process exits non-zero
//!
//! ## Examples
//!
//! ```bash
//! # Generate every template root below the current directory
//! rootgen generate
//!
//! # Preview generation for one subtree with a parameter
//! rootgen --dry-run gen components --var name=button
//!
//! # Generate into a scratch directory instead of next to the templates
//! rootgen g --into /tmp/scratch --var user.email=me@example.com
//! ```
//!
use crate::commands::GlobalOptions;
use crate::common::network::HttpFetcher;
use crate::common::ui::{display_path, Reporter};
use crate::core::config::{self, Config};
use crate::core::context::GenerationContext;
use crate::core::error::{Result, RootgenError};
use crate::core::generator::{ChangeKind, GenerateOptions, GenerationSummary, Generator};
use anyhow::{anyhow, Context};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// # Generate Arguments (`GenerateArgs`)
///
/// Arguments accepted by `rootgen generate`.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Directory to scan recursively for template roots.
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Sets a parameter value. Can be specified multiple times; dotted keys
    /// (`user.email=...`) create nested values.
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_key_val, action = clap::ArgAction::Append)]
    var: Vec<(String, String)>,
}

/// # Parse Key-Value Pair (`parse_key_val`)
///
/// Splits a `--var` argument of the form `KEY=VALUE` on the first `=`,
/// trimming whitespace around both halves.
///
/// ## Returns
/// * `Ok((key, value))` on success.
/// * `Err` if there is no `=` or the key is empty.
fn parse_key_val(s: &str) -> Result<(String, String)> {
    let (key, value) = s
        .split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| {
            anyhow!(RootgenError::ArgumentParsing(format!(
                "Invalid variable format: '{}'. Expected format: KEY=VALUE",
                s
            )))
        })?;
    if key.is_empty() {
        anyhow::bail!(RootgenError::ArgumentParsing(format!(
            "Invalid variable format: '{}'. The key cannot be empty",
            s
        )));
    }
    Ok((key, value))
}

/// # Handle Generate Command (`handle_generate`)
///
/// Runs a full generation pass for `args.directory`.
///
/// ## Returns
/// * `Ok(())` when every entry succeeded (or was unchanged).
/// * `Err` on startup failures, or after the run when any entry failed.
pub fn handle_generate(args: GenerateArgs, global: &GlobalOptions) -> Result<()> {
    info!("Handling generate command...");
    let reporter = global.reporter();
    let cfg = config::load_config().context("Failed to load rootgen configuration")?;

    let search_dir = resolve_search_dir(&args.directory)?;
    let options = build_options(global, &cfg);
    let context = build_context(&cfg, std::env::vars(), &args.var);
    debug!("Generation context: {:?}", context);

    let fetcher = HttpFetcher::new()?;
    let summary = Generator::new(&options, &context, &reporter, &fetcher).run(&search_dir)?;
    print_summary(&reporter, &summary, &search_dir, options.dry_run);

    if let Some(first) = summary.failures.first() {
        anyhow::bail!(RootgenError::FileSystem(format!(
            "{} entries failed, first was {}: {:#}",
            summary.failures.len(),
            display_path(&first.path),
            first.error
        )));
    }
    Ok(())
}

/// Expands `~` and makes the search directory absolute, failing when it is
/// not an existing directory.
fn resolve_search_dir(directory: &Path) -> Result<PathBuf> {
    let expanded = PathBuf::from(shellexpand::tilde(&directory.to_string_lossy()).into_owned());
    let absolute = std::path::absolute(&expanded)
        .with_context(|| format!("Failed to resolve search directory {}", expanded.display()))?;
    if !absolute.is_dir() {
        anyhow::bail!(RootgenError::FileSystem(format!(
            "Search directory does not exist or is not a directory: {}",
            absolute.display()
        )));
    }
    Ok(absolute)
}

/// Combines the global flags with `[generate]` settings. `--into` wins over
/// `generate.into`.
fn build_options(global: &GlobalOptions, cfg: &Config) -> GenerateOptions {
    let into = global
        .into
        .as_ref()
        .map(|p| PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).into_owned()))
        .or_else(|| cfg.generate.into.as_ref().map(PathBuf::from));

    GenerateOptions {
        dry_run: global.dry_run,
        into,
        skip_dirs: cfg.generate.skip_dirs.clone(),
    }
}

/// Assembles the run context, lowest precedence first: config, environment,
/// then `--var` flags.
fn build_context<I>(cfg: &Config, env_vars: I, vars: &[(String, String)]) -> GenerationContext
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut context = GenerationContext::from_table(cfg.context.clone());
    context.apply_env(env_vars);
    for (key, value) in vars {
        info!("Applying context variable: {} = {}", key, value);
        context.insert_dotted(key, value.clone());
    }
    context
}

fn print_summary(reporter: &Reporter, summary: &GenerationSummary, search_dir: &Path, dry_run: bool) {
    if summary.roots == 0 && summary.skipped_roots.is_empty() {
        reporter.log_info(&format!(
            "No template roots found in {}",
            display_path(search_dir)
        ));
        return;
    }

    reporter.log_info(&format!(
        "{} created, {} updated, {} removed, {} unchanged across {} template root(s)",
        summary.count(ChangeKind::Create),
        summary.count(ChangeKind::Update),
        summary.count(ChangeKind::Remove),
        summary.count(ChangeKind::Unchanged),
        summary.roots
    ));
    if dry_run {
        reporter.log_info(&format!(
            "Dry run: {} change(s) reported, nothing written",
            summary.reported_only()
        ));
    } else {
        debug!("{} filesystem writes performed", summary.writes());
    }
    for record in &summary.records {
        trace!("{:?} {}", record.kind, record.path.display());
    }
    if summary.has_failures() {
        reporter.log_info(&format!("{} entries failed", summary.failures.len()));
    }
    if !summary.skipped_roots.is_empty() {
        reporter.log_info(&format!(
            "{} invalid template root(s) skipped",
            summary.skipped_roots.len()
        ));
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use toml::Value;

    #[test]
    fn test_generate_args_parsing() {
        let args = GenerateArgs::try_parse_from(["generate"]).unwrap();
        assert_eq!(args.directory, PathBuf::from("."));
        assert!(args.var.is_empty());

        let args = GenerateArgs::try_parse_from([
            "generate",
            "components",
            "--var",
            "name=button",
            "--var",
            "user.email = me@example.com",
        ])
        .unwrap();
        assert_eq!(args.directory, PathBuf::from("components"));
        assert_eq!(
            args.var,
            vec![
                ("name".to_string(), "button".to_string()),
                ("user.email".to_string(), "me@example.com".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_key_val_logic() {
        assert_eq!(
            parse_key_val("name=value").unwrap(),
            ("name".to_string(), "value".to_string())
        );
        assert_eq!(
            parse_key_val("eq=a=b").unwrap(),
            ("eq".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_key_val("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
        assert!(parse_key_val("invalid_no_equals").is_err());
        assert!(parse_key_val("=valueonly").is_err());
    }

    #[test]
    fn test_build_context_precedence() {
        let cfg: Config = toml::from_str(
            r#"
            [context]
            name = "from-config"
            author = "config-author"
            [context.user]
            email = "config@example.com"
            "#,
        )
        .unwrap();
        let env_vars = vec![
            ("ROOTGEN_VAR_AUTHOR".to_string(), "env-author".to_string()),
            ("ROOTGEN_VAR_NAME".to_string(), "from-env".to_string()),
        ];
        let vars = vec![("name".to_string(), "from-cli".to_string())];

        let context = build_context(&cfg, env_vars, &vars);
        assert_eq!(context.lookup(&["name"]).and_then(Value::as_str), Some("from-cli"));
        assert_eq!(
            context.lookup(&["author"]).and_then(Value::as_str),
            Some("env-author")
        );
        assert_eq!(
            context.lookup(&["user", "email"]).and_then(Value::as_str),
            Some("config@example.com")
        );
    }

    #[test]
    fn test_build_options_prefers_cli_into() {
        let mut cfg = Config::default();
        cfg.generate.into = Some("/from/config".to_string());

        let from_config = build_options(&GlobalOptions::default(), &cfg);
        assert_eq!(from_config.into, Some(PathBuf::from("/from/config")));

        let global = GlobalOptions {
            into: Some(PathBuf::from("/from/cli")),
            dry_run: true,
            ..Default::default()
        };
        let from_cli = build_options(&global, &cfg);
        assert_eq!(from_cli.into, Some(PathBuf::from("/from/cli")));
        assert!(from_cli.dry_run);
        assert_eq!(from_cli.skip_dirs, cfg.generate.skip_dirs);
    }

    #[test]
    fn test_resolve_search_dir() {
        let dir = tempdir().unwrap();
        let resolved = resolve_search_dir(dir.path()).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolve_search_dir(&dir.path().join("missing")).is_err());
    }
}
