//! # rootgen UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/rootgen
//!
//! ## Overview
//!
//! The `Reporter` prints the human-readable notices a user sees during a run:
//! which files are being created, updated, left unchanged or removed, and
//! which entries failed. It is separate from `tracing` diagnostics. Those go
//! to stderr and are controlled with `-v`/`RUST_LOG`, while reporter lines
//! are always shown unless `--silent` is given.
//!
//! ## Format
//!
//! ```text
//! [14:02:11] creating button/button.rs
//! [14:02:11] updating button/README.md
//! [14:02:11] unchanged button/mod.rs
//! [14:02:11] [dry run] removing old/button.txt
//! [14:02:11] error Failed to generate blocked/b.txt: Path exists but is not a directory: blocked
//! ```
//!
//! Every line starts with a local `HH:MM:SS` timestamp. Labels are colored
//! with `colored` unless colors were disabled with `--no-colors`. Paths are
//! shown relative to the working directory when they live beneath it.
//!
//! The reporter holds no state besides the two flags it was built with; it is
//! created once in `main` and passed by reference.
//!
use crate::common::fs::path::FileRef;
use crate::core::generator::ChangeKind;
use chrono::{DateTime, Local};
use colored::{Color, Colorize};
use std::env;
use std::path::Path;

/// Prints change, removal and error notices.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    silent: bool,
    colors: bool,
}

impl Reporter {
    pub fn new(silent: bool, colors: bool) -> Self {
        Self { silent, colors }
    }

    /// Announces a write to `file` and returns whether it is a create or an
    /// update, based on whether the target exists right now.
    ///
    /// Call this before performing the write.
    pub fn log_change(&self, file: &FileRef, dry_run: bool) -> ChangeKind {
        let path = file.resolve();
        let kind = if path.exists() {
            ChangeKind::Update
        } else {
            ChangeKind::Create
        };
        let (label, color) = match kind {
            ChangeKind::Create => ("creating", Color::Green),
            _ => ("updating", Color::Yellow),
        };
        self.emit_out(&self.format_line(Local::now(), label, color, dry_run, &display_path(&path)));
        kind
    }

    /// Notes that `file` already has the generated content.
    pub fn log_unchanged(&self, file: &FileRef, dry_run: bool) {
        let path = file.resolve();
        self.emit_out(&self.format_line(
            Local::now(),
            "unchanged",
            Color::BrightBlack,
            dry_run,
            &display_path(&path),
        ));
    }

    /// Announces the removal of `file`.
    pub fn log_removal(&self, file: &FileRef, dry_run: bool) {
        let path = file.resolve();
        self.emit_out(&self.format_line(
            Local::now(),
            "removing",
            Color::Red,
            dry_run,
            &display_path(&path),
        ));
    }

    /// Prints an error notice to stderr, with the error chain when given.
    pub fn log_error(&self, text: &str, error: Option<&anyhow::Error>) {
        let message = match error {
            Some(e) => format!("{}: {:#}", text, e),
            None => text.to_string(),
        };
        if !self.silent {
            eprintln!(
                "{}",
                self.format_line(Local::now(), "error", Color::Red, false, &message)
            );
        }
    }

    /// Prints a plain informational line (run summaries, next steps).
    pub fn log_info(&self, text: &str) {
        self.emit_out(&self.format_line(Local::now(), "info", Color::Cyan, false, text));
    }

    fn emit_out(&self, line: &str) {
        if !self.silent {
            println!("{}", line);
        }
    }

    /// Builds one reporter line.
    pub fn format_line(
        &self,
        at: DateTime<Local>,
        label: &str,
        color: Color,
        dry_run: bool,
        subject: &str,
    ) -> String {
        let stamp = format!("[{}]", at.format("%H:%M:%S"));
        let marker = if dry_run { "[dry run] " } else { "" };
        if self.colors {
            format!(
                "{} {}{} {}",
                stamp.dimmed(),
                marker.bright_black(),
                label.color(color).bold(),
                subject
            )
        } else {
            format!("{} {}{} {}", stamp, marker, label, subject)
        }
    }
}

/// Shows `path` relative to the working directory when it lies beneath it.
pub fn display_path(path: &Path) -> String {
    if path.is_absolute() {
        if let Ok(cwd) = env::current_dir() {
            if let Some(relative) = pathdiff::diff_paths(path, &cwd) {
                if !relative.starts_with("..") && !relative.as_os_str().is_empty() {
                    return relative.display().to_string();
                }
            }
        }
    }
    path.display().to_string()
}
