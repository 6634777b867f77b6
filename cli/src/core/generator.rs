//! # rootgen Generation Engine
//!
//! File: cli/src/core/generator.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/rootgen
//!
//! ## Overview
//!
//! The generator turns discovered template roots into files on disk. For
//! every entry it computes a target path and target content by substitution,
//! compares the content with what is already there, and writes only when
//! something changed. Running it twice over the same input therefore performs
//! no writes the second time.
//!
//! ## Architecture
//!
//! For each template root, in discovery order:
//! 1. Layer the run context over the root's `[context]` defaults.
//! 2. Compute the target base: the `--into` override (or the directory that
//!    contains the root), joined with the descriptor's `into` when present.
//! 3. Process `remove` paths, then entries (depth-first, file-name order), then
//!    `[[fetch]]` entries.
//!
//! Template files that are not valid UTF-8 are copied byte for byte without
//! substitution. Every target path (entries, removals, fetches and the
//! descriptor's `into`) must stay inside the target base; one that is absolute
//! or climbs out with `..` fails that entry.
//!
//! Each entry ends in one of three states: unchanged (no write), written, or
//! reported only (dry run). A failing entry is logged, recorded in the
//! `GenerationSummary`, and does not stop its siblings. A root that cannot be
//! loaded is skipped the same way.
//!
//! ## Examples
//!
//! ```rust
//! let reporter = Reporter::new(false, true);
//! let fetcher = HttpFetcher::new()?;
//! let options = GenerateOptions { dry_run: false, into: None, skip_dirs: vec![] };
//! let generator = Generator::new(&options, &context, &reporter, &fetcher);
//! let summary = generator.run(Path::new("."))?;
//! println!("{} files written", summary.writes());
//! ```
//!
use crate::common::fs::io;
use crate::common::fs::path::{clean, FileRef};
use crate::common::network::Fetcher;
use crate::common::ui::Reporter;
use crate::core::context::GenerationContext;
use crate::core::diff::differs;
use crate::core::error::{Result, RootgenError};
use crate::core::template_root::{self, Discovered, EntryKind, TemplateEntry, TemplateRoot};
use crate::core::templating::{substitute, substitute_path};
use anyhow::Context;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Settings for one generation run, built once from the command line and
/// configuration.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Report intended changes without touching the filesystem.
    pub dry_run: bool,
    /// Replaces the directory containing each template root as the target base.
    pub into: Option<PathBuf>,
    /// Directory names not entered while discovering template roots.
    pub skip_dirs: Vec<String>,
}

/// Classification of what happened (or would happen) to one target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Create,
    Update,
    Remove,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub path: PathBuf,
    pub kind: ChangeKind,
    /// True when the change was only reported.
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct EntryFailure {
    pub path: PathBuf,
    pub error: anyhow::Error,
}

/// Everything a run decided, in the order it was decided.
#[derive(Debug, Default)]
pub struct GenerationSummary {
    pub roots: usize,
    pub records: Vec<ChangeRecord>,
    pub failures: Vec<EntryFailure>,
    pub skipped_roots: Vec<PathBuf>,
}

impl GenerationSummary {
    pub fn count(&self, kind: ChangeKind) -> usize {
        self.records.iter().filter(|r| r.kind == kind).count()
    }

    /// Number of changes that actually mutated the filesystem.
    pub fn writes(&self) -> usize {
        self.records
            .iter()
            .filter(|r| !r.dry_run && r.kind != ChangeKind::Unchanged)
            .count()
    }

    /// Number of changes reported but not performed because of dry run.
    pub fn reported_only(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.dry_run && r.kind != ChangeKind::Unchanged)
            .count()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    fn record(&mut self, path: PathBuf, kind: ChangeKind, dry_run: bool) {
        self.records.push(ChangeRecord {
            path,
            kind,
            dry_run,
        });
    }
}

/// Drives generation for every template root below a search directory.
pub struct Generator<'a> {
    options: &'a GenerateOptions,
    context: &'a GenerationContext,
    reporter: &'a Reporter,
    fetcher: &'a dyn Fetcher,
}

impl<'a> Generator<'a> {
    pub fn new(
        options: &'a GenerateOptions,
        context: &'a GenerationContext,
        reporter: &'a Reporter,
        fetcher: &'a dyn Fetcher,
    ) -> Self {
        Self {
            options,
            context,
            reporter,
            fetcher,
        }
    }

    /// Discovers template roots under `search_dir` and generates each one.
    ///
    /// # Errors
    ///
    /// Only fails when `search_dir` cannot be scanned at all. Per-root and
    /// per-entry problems are collected in the returned summary.
    pub fn run(&self, search_dir: &Path) -> Result<GenerationSummary> {
        info!("Scanning '{}' for template roots", search_dir.display());
        let discovered = template_root::discover(search_dir, &self.options.skip_dirs)?;

        let mut summary = GenerationSummary::default();
        for item in discovered {
            match item {
                Discovered::Root(root) => self.generate_root(&root, &mut summary),
                Discovered::Invalid { path, error } => {
                    self.reporter
                        .log_error(&format!("Skipping {}", path.display()), Some(&error));
                    summary.skipped_roots.push(path);
                }
            }
        }

        info!(
            "Generation finished: {} roots, {} created, {} updated, {} removed, {} unchanged, {} failed",
            summary.roots,
            summary.count(ChangeKind::Create),
            summary.count(ChangeKind::Update),
            summary.count(ChangeKind::Remove),
            summary.count(ChangeKind::Unchanged),
            summary.failures.len()
        );
        Ok(summary)
    }

    /// Generates a single loaded template root into the target tree.
    pub fn generate_root(&self, root: &TemplateRoot, summary: &mut GenerationSummary) {
        summary.roots += 1;
        let context = self.context.layered_over(&root.descriptor.context);
        let base = match self.target_base(root, &context) {
            Ok(base) => base,
            Err(error) => {
                self.fail(root.path.clone(), error, summary);
                return;
            }
        };
        info!(
            "Generating '{}' into '{}'",
            root.path.display(),
            base.display()
        );

        for removal in &root.descriptor.remove {
            let relative = substitute_path(Path::new(removal), &context);
            let outcome = confine(&base, &relative, false)
                .and_then(|target| self.remove_target(&FileRef::from(target), summary));
            if let Err(error) = outcome {
                self.fail(base.join(&relative), error, summary);
            }
        }

        for entry in &root.entries {
            if let Err(error) = self.generate_entry(entry, &base, &context, summary) {
                self.fail(entry.source.clone(), error, summary);
            }
        }

        for fetch in &root.descriptor.fetch {
            let relative = substitute_path(Path::new(&fetch.path), &context);
            let url = substitute(&fetch.url, &context);
            let outcome = confine(&base, &relative, false).and_then(|target| {
                let body = self.fetcher.fetch(&url)?;
                self.apply_content(&FileRef::from(target), &body, summary)
            });
            if let Err(error) = outcome {
                self.fail(base.join(&relative), error, summary);
            }
        }
    }

    /// The override (or the directory holding the root), plus the
    /// descriptor's `into`, which must stay below it.
    fn target_base(&self, root: &TemplateRoot, context: &GenerationContext) -> Result<PathBuf> {
        let discovered_in = root
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let base = self.options.into.clone().unwrap_or(discovered_in);
        match &root.descriptor.into {
            Some(into) => confine(&base, &substitute_path(Path::new(into), context), true)
                .context("Invalid `into` in descriptor"),
            None => Ok(base),
        }
    }

    fn generate_entry(
        &self,
        entry: &TemplateEntry,
        base: &Path,
        context: &GenerationContext,
        summary: &mut GenerationSummary,
    ) -> Result<()> {
        let target = FileRef::from(confine(base, &substitute_path(&entry.relative, context), false)?);
        match entry.kind {
            EntryKind::File => {
                let template = fs::read(&entry.source).with_context(|| {
                    format!("Failed to read template file {}", entry.source.display())
                })?;
                match String::from_utf8(template) {
                    Ok(text) => self.apply_content(&target, &substitute(&text, context), summary),
                    Err(binary) => {
                        debug!("Copying {} as binary", entry.source.display());
                        self.apply_bytes(&target, binary.as_bytes(), summary)
                    }
                }
            }
            EntryKind::EmptyDir => {
                let path = target.resolve();
                if path.is_dir() {
                    self.unchanged(&target, summary);
                    return Ok(());
                }
                let kind = self.reporter.log_change(&target, self.options.dry_run);
                if !self.options.dry_run {
                    io::ensure_ancestors(&path)?;
                }
                summary.record(path, kind, self.options.dry_run);
                Ok(())
            }
        }
    }

    /// Writes `content` to `target` unless the existing file already matches.
    fn apply_content(
        &self,
        target: &FileRef,
        content: &str,
        summary: &mut GenerationSummary,
    ) -> Result<()> {
        let existing = io::read(target)?;
        if existing.is_some() && !differs(existing.as_deref(), Some(content)) {
            self.unchanged(target, summary);
            return Ok(());
        }

        let kind = self.reporter.log_change(target, self.options.dry_run);
        if !self.options.dry_run {
            io::write(target, content)?;
        }
        summary.record(target.resolve(), kind, self.options.dry_run);
        Ok(())
    }

    /// Copies non-text template content, comparing byte for byte.
    fn apply_bytes(
        &self,
        target: &FileRef,
        content: &[u8],
        summary: &mut GenerationSummary,
    ) -> Result<()> {
        if io::read_bytes(target)?.as_deref() == Some(content) {
            self.unchanged(target, summary);
            return Ok(());
        }

        let kind = self.reporter.log_change(target, self.options.dry_run);
        if !self.options.dry_run {
            io::write_bytes(target, content)?;
        }
        summary.record(target.resolve(), kind, self.options.dry_run);
        Ok(())
    }

    fn unchanged(&self, target: &FileRef, summary: &mut GenerationSummary) {
        self.reporter.log_unchanged(target, self.options.dry_run);
        summary.record(target.resolve(), ChangeKind::Unchanged, self.options.dry_run);
    }

    fn remove_target(&self, target: &FileRef, summary: &mut GenerationSummary) -> Result<()> {
        let path = target.resolve();
        if fs::symlink_metadata(&path).is_err() {
            debug!("Nothing to remove at {}", path.display());
            return Ok(());
        }
        self.reporter.log_removal(target, self.options.dry_run);
        if !self.options.dry_run {
            io::remove(target)?;
        }
        summary.record(path, ChangeKind::Remove, self.options.dry_run);
        Ok(())
    }

    fn fail(&self, path: PathBuf, error: anyhow::Error, summary: &mut GenerationSummary) {
        self.reporter
            .log_error(&format!("Failed to generate {}", path.display()), Some(&error));
        summary.failures.push(EntryFailure { path, error });
    }
}

/// Joins `relative` onto `base`, refusing paths that are absolute or that
/// leave `base`. The base itself is only accepted when `allow_base` is set.
fn confine(base: &Path, relative: &Path, allow_base: bool) -> Result<PathBuf> {
    let rooted = relative
        .components()
        .any(|c| matches!(c, Component::Prefix(_) | Component::RootDir));
    let cleaned = clean(relative);
    let escapes = cleaned.starts_with("..");
    let is_base = cleaned == Path::new(".");
    if rooted || escapes || (is_base && !allow_base) {
        anyhow::bail!(RootgenError::FileSystem(format!(
            "'{}' does not stay inside {}",
            relative.display(),
            base.display()
        )));
    }
    if is_base {
        return Ok(base.to_path_buf());
    }
    Ok(base.join(cleaned))
}
