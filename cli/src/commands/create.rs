//! # rootgen Create Command
//!
//! File: cli/src/commands/create.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/rootgen
//!
//! ## Overview
//!
//! This module implements `rootgen create` (alias `c`), which writes a
//! starter template root: a commented `templateroot.toml` descriptor and one
//! sample entry, `_name_/README.md`. Running `rootgen generate` right after
//! produces `example/README.md` next to the new template root.
//!
//! An existing descriptor is never replaced unless `--overwrite` is given.
//! `--dry-run` reports the files that would be written without creating them.
//!
//! ## Examples
//!
//! ```bash
//! # Create ./example.templateroot
//! rootgen create
//!
//! # Create a template root for components and replace an existing descriptor
//! rootgen c components/widget.templateroot --overwrite
//! ```
//!
use crate::commands::GlobalOptions;
use crate::common::fs::{io, path::FileRef};
use crate::common::ui::{display_path, Reporter};
use crate::core::error::{Result, RootgenError};
use crate::core::template_root::{has_root_suffix, DESCRIPTOR_FILE, ROOT_SUFFIX};
use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const STARTER_DESCRIPTOR: &str = r#"# rootgen template root descriptor.
#
# Every file and directory next to this one is generated into the directory
# that contains this template root. Tokens such as _name_ or _user.email_ in
# names and contents are replaced with context values.

# Generate into a sub-directory of the target instead.
# into = "generated"

# Paths (relative to the target) to delete when present.
# remove = ["old/_name_.txt"]

# Default parameter values. `--var name=...` overrides them.
[context]
name = "example"

# Remote files written into the target tree.
# [[fetch]]
# url = "https://example.com/_name_.js"
# path = "vendor/_name_.js"
"#;

const STARTER_README: &str = "# _name_\n\nGenerated by rootgen.\n";

/// # Create Arguments (`CreateArgs`)
///
/// Arguments accepted by `rootgen create`.
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Directory of the new template root.
    #[arg(default_value = "example.templateroot")]
    directory: PathBuf,

    /// Replace an existing descriptor.
    #[arg(long)]
    overwrite: bool,
}

/// # Handle Create Command (`handle_create`)
///
/// Writes the starter descriptor and sample entry into `args.directory`.
///
/// ## Returns
/// * `Ok(())` when the files were written (or reported under `--dry-run`).
/// * `Err` when a descriptor already exists without `--overwrite`, or a write fails.
pub fn handle_create(args: CreateArgs, global: &GlobalOptions) -> Result<()> {
    info!("Handling create command for {}", args.directory.display());
    let reporter = global.reporter();
    let directory = PathBuf::from(shellexpand::tilde(&args.directory.to_string_lossy()).into_owned());

    if !has_root_suffix(&directory) {
        warn!(
            "'{}' does not end in '{}' and will not be found by `rootgen generate`",
            directory.display(),
            ROOT_SUFFIX
        );
    }

    let descriptor = FileRef::parts(&directory, DESCRIPTOR_FILE);
    if descriptor.resolve().exists() && !args.overwrite {
        anyhow::bail!(RootgenError::FileSystem(format!(
            "{} already exists. Use --overwrite to replace it.",
            descriptor
        )));
    }

    write_starter_file(&reporter, &descriptor, STARTER_DESCRIPTOR, global.dry_run)?;

    let readme = FileRef::parts(directory.join("_name_"), "README.md");
    if readme.resolve().exists() {
        info!("Keeping existing sample entry {}", readme);
    } else {
        write_starter_file(&reporter, &readme, STARTER_README, global.dry_run)?;
    }

    print_next_steps(&reporter, &directory);
    Ok(())
}

fn write_starter_file(reporter: &Reporter, file: &FileRef, contents: &str, dry_run: bool) -> Result<()> {
    reporter.log_change(file, dry_run);
    if !dry_run {
        io::write(file, contents).with_context(|| format!("Failed to create {}", file))?;
    }
    Ok(())
}

fn print_next_steps(reporter: &Reporter, directory: &Path) {
    let parent = directory
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(display_path)
        .unwrap_or_else(|| ".".to_string());
    reporter.log_info(&format!(
        "Edit {} and run `rootgen generate {}`",
        display_path(&directory.join(DESCRIPTOR_FILE)),
        parent
    ));
}
