//! # rootgen Path Normalization
//!
//! File: cli/src/common/fs/path.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/rootgen
//!
//! ## Overview
//!
//! Purely lexical path handling shared by the reader, the writer and the
//! reporter:
//! - **`normalize_path`**: Canonicalizes a path string. Root-relative input
//!   (leading separator) is made absolute with the working-directory rules of
//!   the platform, which on Windows means picking up the current drive. Any
//!   other input is cleaned without being made absolute.
//! - **`clean`**: Collapses repeated separators, drops `.` segments and folds
//!   `name/..` pairs without touching the filesystem.
//! - **`FileRef`**: A file reference given either as a literal path or as a
//!   `dirname` + `basename` pair. Both forms resolve through `FileRef::resolve`
//!   so a read and a later write of the same logical file agree on the path.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::path::{normalize_path, FileRef};
//!
//! assert_eq!(normalize_path("a//b/./c"), format!("a{0}b{0}c", std::path::MAIN_SEPARATOR));
//!
//! let readme = FileRef::parts("docs/guide", "README.md");
//! let same = FileRef::from("docs/./guide/README.md");
//! assert_eq!(readme.resolve(), same.resolve());
//! ```
//!
use std::ffi::OsString;
use std::fmt;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Returns the canonical form of `path`.
///
/// Empty input is returned unchanged. A path beginning with `/` (or the
/// platform separator) is resolved to an absolute path; everything else is
/// lexically cleaned and stays relative.
pub fn normalize_path(path: &str) -> String {
    normalize(Path::new(path)).to_string_lossy().into_owned()
}

/// Path form of `normalize_path`. Segments are never converted to text, so
/// names that are not valid UTF-8 come through intact.
pub fn normalize(path: &Path) -> PathBuf {
    if path.as_os_str().is_empty() {
        return PathBuf::new();
    }

    if path.has_root() {
        // `absolute` only consults the working directory (and drive on Windows);
        // fall back to the raw input if even that is unavailable.
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        return clean(&absolute);
    }

    clean(path)
}

/// Lexically cleans a path.
///
/// Leading `..` segments of a relative path are preserved, `..` directly under
/// the root is dropped, and a path that cleans away entirely becomes `.`.
pub fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    // Number of `Normal` segments currently at the tail of `cleaned`.
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => cleaned.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    cleaned.pop();
                    depth -= 1;
                } else if !cleaned.has_root() {
                    cleaned.push("..");
                }
            }
            Component::Normal(segment) => {
                cleaned.push(segment);
                depth += 1;
            }
        }
    }

    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}

/// A reference to a file, either as one literal path or as a directory plus
/// file name pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileRef {
    Path(PathBuf),
    Parts { dirname: PathBuf, basename: OsString },
}

impl FileRef {
    /// Builds the `dirname` + `basename` form.
    pub fn parts(dirname: impl Into<PathBuf>, basename: impl Into<OsString>) -> Self {
        FileRef::Parts {
            dirname: dirname.into(),
            basename: basename.into(),
        }
    }

    /// Resolves the reference to a single normalized path.
    pub fn resolve(&self) -> PathBuf {
        let joined = match self {
            FileRef::Path(path) => path.clone(),
            FileRef::Parts { dirname, basename } => dirname.join(basename),
        };
        normalize(&joined)
    }
}

impl From<PathBuf> for FileRef {
    fn from(path: PathBuf) -> Self {
        FileRef::Path(path)
    }
}

impl From<&Path> for FileRef {
    fn from(path: &Path) -> Self {
        FileRef::Path(path.to_path_buf())
    }
}

impl From<&str> for FileRef {
    fn from(path: &str) -> Self {
        FileRef::Path(PathBuf::from(path))
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resolve().display())
    }
}
