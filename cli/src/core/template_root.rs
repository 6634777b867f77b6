//! # rootgen Template Roots
//!
//! File: cli/src/core/template_root.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/rootgen
//!
//! ## Overview
//!
//! A template root is a directory whose name ends in `.templateroot` and that
//! contains a `templateroot.toml` descriptor. Everything else inside it is a
//! template entry. Entries are generated next to the template root (into the
//! directory that contains it) unless the descriptor or `--into` says
//! otherwise.
//!
//! ```text
//! components/
//! └── widget.templateroot/
//!     ├── templateroot.toml        descriptor (not generated)
//!     └── _name_/
//!         ├── _name_.rs
//!         └── README.md
//! ```
//!
//! ## Discovery
//!
//! `discover` walks the search directory in file-name order so repeated runs
//! see the same sequence. Hidden directories and the configured skip list
//! (`node_modules`, `target` by default) are not entered, and a template root
//! is never searched for further roots. A `.templateroot` directory whose
//! descriptor is missing or does not parse is returned as
//! `Discovered::Invalid`; the caller logs it and carries on with the rest.
//!
//! ## Descriptor
//!
//! ```toml
//! into = "src"                     # optional sub-directory of the target
//! remove = ["old/_name_.txt"]      # optional, deleted when present
//!
//! [context]                        # optional parameter defaults
//! name = "widget"
//!
//! [[fetch]]                        # optional remote files
//! url = "https://example.com/_name_.js"
//! path = "vendor/_name_.js"
//! ```
//!
use crate::core::error::{Result, RootgenError};
use anyhow::Context;
use serde::Deserialize;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use toml::Table;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Directory-name suffix identifying a template root.
pub const ROOT_SUFFIX: &str = ".templateroot";
/// Marker and descriptor file inside a template root.
pub const DESCRIPTOR_FILE: &str = "templateroot.toml";

/// Parsed contents of `templateroot.toml`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Descriptor {
    /// Sub-directory of the target base to generate into. May contain tokens.
    #[serde(default)]
    pub into: Option<String>,
    /// Parameter defaults for this root. Run-level values override them.
    #[serde(default)]
    pub context: Table,
    /// Target-relative paths to delete when present. May contain tokens.
    #[serde(default)]
    pub remove: Vec<String>,
    /// Remote files written into the target tree.
    #[serde(default)]
    pub fetch: Vec<FetchSpec>,
}

/// One `[[fetch]]` entry.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FetchSpec {
    pub url: String,
    /// Target-relative destination path. May contain tokens.
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    /// A directory with no children. Directories with children are created
    /// implicitly when their files are written.
    EmptyDir,
}

/// A file or empty directory inside a template root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    /// Absolute (or search-relative) path of the entry in the template.
    pub source: PathBuf,
    /// Path relative to the template root, before substitution.
    pub relative: PathBuf,
    pub kind: EntryKind,
}

/// A loaded template root.
#[derive(Debug, Clone)]
pub struct TemplateRoot {
    pub path: PathBuf,
    pub descriptor: Descriptor,
    /// Entries in deterministic depth-first, file-name order.
    pub entries: Vec<TemplateEntry>,
}

/// Outcome of finding a `.templateroot` directory.
#[derive(Debug)]
pub enum Discovered {
    Root(TemplateRoot),
    Invalid { path: PathBuf, error: anyhow::Error },
}

/// Returns true when `path`'s final component carries the template-root suffix.
pub fn has_root_suffix(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(ROOT_SUFFIX))
        .unwrap_or(false)
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Recursively finds template roots below (and including) `search_dir`.
///
/// # Errors
///
/// Returns an `Err` only when `search_dir` itself is not a readable
/// directory. Problems with individual roots are reported as
/// `Discovered::Invalid`.
pub fn discover(search_dir: &Path, skip_dirs: &[String]) -> Result<Vec<Discovered>> {
    if !search_dir.is_dir() {
        anyhow::bail!(RootgenError::FileSystem(format!(
            "Search directory does not exist or is not a directory: {}",
            search_dir.display()
        )));
    }

    let mut found = Vec::new();
    let mut walker = WalkDir::new(search_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let name = entry.file_name();
            !is_hidden(name) && !skip_dirs.iter().any(|skip| OsStr::new(skip) == name)
        });

    while let Some(entry_result) = walker.next() {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                warn!(
                    "Failed to access entry while scanning '{}': {}",
                    search_dir.display(),
                    e
                );
                continue;
            }
        };
        if !entry.file_type().is_dir() || !has_root_suffix(entry.path()) {
            continue;
        }

        let root_path = entry.path().to_path_buf();
        debug!("Found template root candidate {}", root_path.display());
        match TemplateRoot::load(&root_path) {
            Ok(root) => found.push(Discovered::Root(root)),
            Err(error) => found.push(Discovered::Invalid {
                path: root_path,
                error,
            }),
        }
        walker.skip_current_dir();
    }

    Ok(found)
}

impl TemplateRoot {
    /// Reads the descriptor and enumerates the entries of the root at `path`.
    pub fn load(path: &Path) -> Result<TemplateRoot> {
        let descriptor_path = path.join(DESCRIPTOR_FILE);
        if !descriptor_path.is_file() {
            anyhow::bail!(RootgenError::TemplateRoot {
                path: path.display().to_string(),
                reason: format!("missing {}", DESCRIPTOR_FILE),
            });
        }
        let descriptor = load_descriptor(&descriptor_path).map_err(|e| {
            anyhow::Error::new(RootgenError::TemplateRoot {
                path: path.display().to_string(),
                reason: format!("{:#}", e),
            })
        })?;

        Ok(TemplateRoot {
            path: path.to_path_buf(),
            descriptor,
            entries: enumerate_entries(path)?,
        })
    }
}

/// Parses a descriptor file.
pub fn load_descriptor(path: &Path) -> Result<Descriptor> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read descriptor {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn enumerate_entries(root: &Path) -> Result<Vec<TemplateEntry>> {
    let mut entries = Vec::new();
    for entry_result in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                warn!(
                    "Failed to access template entry in '{}': {}",
                    root.display(),
                    e
                );
                continue;
            }
        };
        let source = entry.path();
        if entry.depth() == 1 && entry.file_name() == DESCRIPTOR_FILE {
            continue;
        }
        let relative = match source.strip_prefix(root) {
            Ok(p) => p.to_path_buf(),
            Err(_) => {
                warn!(
                    "Could not determine relative path for '{}' based on '{}'",
                    source.display(),
                    root.display()
                );
                continue;
            }
        };

        let kind = if entry.file_type().is_file() {
            EntryKind::File
        } else if entry.file_type().is_dir() {
            let mut children = fs::read_dir(source)
                .with_context(|| format!("Failed to list directory {}", source.display()))?;
            if children.next().is_some() {
                continue;
            }
            EntryKind::EmptyDir
        } else {
            warn!(
                "Skipping unsupported file system entry type at '{}'",
                source.display()
            );
            continue;
        };

        entries.push(TemplateEntry {
            source: source.to_path_buf(),
            relative,
            kind,
        });
    }
    Ok(entries)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn create_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn no_skips() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn test_descriptor_parsing() {
        let descriptor: Descriptor = toml::from_str(
            r#"
            into = "src"
            remove = ["old.txt"]
            [context]
            name = "widget"
            [[fetch]]
            url = "https://example.com/a.js"
            path = "vendor/a.js"
            "#,
        )
        .unwrap();
        assert_eq!(descriptor.into.as_deref(), Some("src"));
        assert_eq!(descriptor.remove, vec!["old.txt"]);
        assert_eq!(descriptor.context["name"].as_str(), Some("widget"));
        assert_eq!(descriptor.fetch.len(), 1);
        assert_eq!(descriptor.fetch[0].path, "vendor/a.js");
    }

    #[test]
    fn test_empty_descriptor_is_valid() {
        let descriptor: Descriptor = toml::from_str("").unwrap();
        assert_eq!(descriptor, Descriptor::default());
    }

    #[test]
    fn test_unknown_descriptor_field_is_rejected() {
        assert!(toml::from_str::<Descriptor>("colour = 'red'").is_err());
    }

    #[test]
    fn test_discover_finds_roots_in_order_and_skips_invalid() {
        let dir = tempdir().unwrap();
        create_file(&dir.path().join("b/two.templateroot/templateroot.toml"), "");
        create_file(&dir.path().join("a/one.templateroot/templateroot.toml"), "");
        create_file(&dir.path().join("a/one.templateroot/file.txt"), "x");
        fs::create_dir_all(dir.path().join("c/broken.templateroot")).unwrap();
        create_file(&dir.path().join("d/bad.templateroot/templateroot.toml"), "into = [");

        let found = discover(dir.path(), &no_skips()).unwrap();
        assert_eq!(found.len(), 4);

        let names: Vec<String> = found
            .iter()
            .map(|d| match d {
                Discovered::Root(root) => root.path.file_name().unwrap().to_string_lossy().into(),
                Discovered::Invalid { path, .. } => {
                    format!("!{}", path.file_name().unwrap().to_string_lossy())
                }
            })
            .collect();
        assert_eq!(
            names,
            vec![
                "one.templateroot",
                "two.templateroot",
                "!broken.templateroot",
                "!bad.templateroot"
            ]
        );
    }

    #[test]
    fn test_discover_skips_hidden_and_configured_dirs() {
        let dir = tempdir().unwrap();
        create_file(&dir.path().join(".git/x.templateroot/templateroot.toml"), "");
        create_file(&dir.path().join("node_modules/y.templateroot/templateroot.toml"), "");
        create_file(&dir.path().join("src/z.templateroot/templateroot.toml"), "");

        let found = discover(dir.path(), &["node_modules".to_string()]).unwrap();
        assert_eq!(found.len(), 1);
        assert!(matches!(&found[0], Discovered::Root(r) if r.path.ends_with("src/z.templateroot")));
    }

    #[test]
    fn test_discover_does_not_descend_into_roots() {
        let dir = tempdir().unwrap();
        create_file(&dir.path().join("outer.templateroot/templateroot.toml"), "");
        create_file(
            &dir.path().join("outer.templateroot/inner.templateroot/templateroot.toml"),
            "",
        );

        let found = discover(dir.path(), &no_skips()).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_discover_missing_search_dir_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(discover(&dir.path().join("missing"), &no_skips()).is_err());
    }

    #[test]
    fn test_entries_exclude_descriptor_and_non_empty_dirs() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("w.templateroot");
        create_file(&root.join("templateroot.toml"), "");
        create_file(&root.join("_name_/_name_.rs"), "");
        create_file(&root.join("README.md"), "");
        fs::create_dir_all(root.join("empty")).unwrap();

        let loaded = TemplateRoot::load(&root).unwrap();
        let listed: Vec<(PathBuf, EntryKind)> = loaded
            .entries
            .iter()
            .map(|e| (e.relative.clone(), e.kind))
            .collect();
        assert_eq!(
            listed,
            vec![
                (PathBuf::from("README.md"), EntryKind::File),
                (PathBuf::from("_name_").join("_name_.rs"), EntryKind::File),
                (PathBuf::from("empty"), EntryKind::EmptyDir),
            ]
        );
    }

    #[test]
    fn test_load_reports_missing_descriptor() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("x.templateroot");
        fs::create_dir_all(&root).unwrap();
        let err = TemplateRoot::load(&root).unwrap_err();
        assert!(err.to_string().contains("missing templateroot.toml"));
    }
}
