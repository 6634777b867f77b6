//! # rootgen Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/rootgen
//!
//! ## Overview
//!
//! This file serves as the main entry point for the rootgen CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up diagnostics (`tracing`) based on verbosity and `--silent`
//! - Routing execution to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! rootgen --help
//!
//! # Write a starter template root, then generate from it
//! rootgen create
//! rootgen generate --var name=widget
//!
//! # Preview without writing, with debug diagnostics
//! rootgen -vv --dry-run generate
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap (a missing command is a usage error)
//! 2. Configure diagnostics
//! 3. Route to the command handler with the parsed global options
//! 4. Report any error and exit with status 1
//!
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command definitions and handlers (generate, create)
mod common; // Shared utilities (fs, network, ui)
mod core; // Core engine (config, context, templating, generator)

use commands::GlobalOptions;

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "rootgen",
    about = "Generate file trees from parameterized template roots",
    long_about = "Discovers `*.templateroot` directories and materializes their files,\n\
                  substituting `_token_` parameters in names and contents.\n\
                  Only files whose content changed are written.",
    arg_required_else_help = true,
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[command(flatten)]
    global: GlobalOptions,
    /// Increase diagnostic output (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a directory for template roots and generate their files.
    #[command(visible_aliases = ["gen", "g"])]
    Generate(commands::generate::GenerateArgs),
    /// Write a starter template root.
    #[command(visible_alias = "c")]
    Create(commands::create::CreateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.global.silent {
        "off"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let env_filter = if cli.global.silent {
        EnvFilter::new(log_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
    };
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.global.no_colors)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Generate(args) => commands::generate::handle_generate(args, &cli.global),
        Commands::Create(args) => commands::create::handle_create(args, &cli.global),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        if !cli.global.silent {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}

// --- Basic Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parses_aliases() {
        for alias in ["generate", "gen", "g"] {
            let cli = Cli::try_parse_from(["rootgen", alias]).unwrap();
            assert!(matches!(cli.command, Commands::Generate(_)), "{alias}");
        }
        let cli = Cli::try_parse_from(["rootgen", "c"]).unwrap();
        assert!(matches!(cli.command, Commands::Create(_)));
    }

    #[test]
    fn test_global_flags_before_and_after_command() {
        let cli = Cli::try_parse_from([
            "rootgen",
            "--dry-run",
            "generate",
            "--into",
            "out",
            "--silent",
            "--no-colors",
        ])
        .unwrap();
        assert!(cli.global.dry_run);
        assert!(cli.global.silent);
        assert!(cli.global.no_colors);
        assert_eq!(cli.global.into, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_missing_command_is_an_error() {
        assert!(Cli::try_parse_from(["rootgen"]).is_err());
    }
}
