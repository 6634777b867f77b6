//! # rootgen Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/rootgen
//!
//! ## Overview
//!
//! This module is the only place where rootgen mutates the target tree. Every
//! function takes a `FileRef` and resolves it through the path normalizer
//! before touching the disk, so the generator, the reporter and this module
//! all agree on which physical file a reference means.
//!
//! ## Architecture
//!
//! - **`read`**: Returns `Ok(None)` for a file that does not exist. A missing
//!   file is an expected state during generation (the file is about to be
//!   created), so it is never an error. Other failures (permissions, a
//!   directory in the way) are returned as errors with context.
//! - **`read_bytes`** / **`write_bytes`**: The same contracts for raw bytes,
//!   used for binary template files.
//! - **`write`**: Creates missing ancestor directories one segment at a time,
//!   starting below the filesystem root, then writes the text. A directory that
//!   already exists, including one created concurrently by another process, is
//!   accepted. An ancestor that exists as a regular file is an error.
//! - **`remove`**: Deletes a file or a whole directory tree and reports whether
//!   anything was there.
//!
//! Failures are not retried; the caller decides whether they are fatal.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::{io, path::FileRef};
//!
//! # fn run_example() -> crate::core::error::Result<()> {
//! let target = FileRef::parts("out/src", "lib.rs");
//! if io::read(&target)?.is_none() {
//!     io::write(&target, "pub fn hello() {}\n")?;
//! }
//! # Ok(())
//! # }
//! ```
//!
use crate::common::fs::path::FileRef;
use crate::core::error::{Result, RootgenError};
use anyhow::Context;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};

/// Reads a file as text, or `None` when it does not exist.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD, so a binary file
/// never compares equal to generated text.
///
/// # Errors
///
/// Returns an `Err` when the path exists but cannot be read, for example due
/// to permissions or because it is a directory.
pub fn read(file: &FileRef) -> Result<Option<String>> {
    Ok(read_bytes(file)?.map(|bytes| match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }))
}

/// Reads a file's raw bytes, or `None` when it does not exist.
pub fn read_bytes(file: &FileRef) -> Result<Option<Vec<u8>>> {
    let path = file.resolve();
    match fs::read(&path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            trace!("No existing file at {}", path.display());
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read file {}", path.display())),
    }
}

/// Writes `contents` to the file, creating parent directories as needed and
/// overwriting any existing file.
///
/// # Errors
///
/// Returns an `Err` if an ancestor directory cannot be created (or exists as a
/// non-directory), or if the final write fails.
pub fn write(file: &FileRef, contents: &str) -> Result<()> {
    write_bytes(file, contents.as_bytes())
}

/// Byte form of `write`, used for template files that are not text.
pub fn write_bytes(file: &FileRef, contents: &[u8]) -> Result<()> {
    let path = file.resolve();
    if let Some(parent) = path.parent() {
        ensure_ancestors(parent)?;
    }
    fs::write(&path, contents).with_context(|| format!("Failed to write file {}", path.display()))?;
    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Removes a file or directory tree. Returns `false` if nothing existed.
pub fn remove(file: &FileRef) -> Result<bool> {
    let path = file.resolve();
    let metadata = match fs::symlink_metadata(&path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to inspect {}", path.display()));
        }
    };

    if metadata.is_dir() {
        fs::remove_dir_all(&path)
            .with_context(|| format!("Failed to remove directory {}", path.display()))?;
    } else {
        fs::remove_file(&path).with_context(|| format!("Failed to remove file {}", path.display()))?;
    }
    debug!("Removed {}", path.display());
    Ok(true)
}

/// Creates `dir` and each of its missing ancestors, one segment at a time.
///
/// Root and drive-prefix components are only accumulated, never created.
pub fn ensure_ancestors(dir: &Path) -> Result<()> {
    let mut current = PathBuf::new();
    for component in dir.components() {
        current.push(component.as_os_str());
        if !matches!(component, Component::Normal(_)) {
            continue;
        }

        match fs::create_dir(&current) {
            Ok(()) => trace!("Created directory {}", current.display()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                if !current.is_dir() {
                    anyhow::bail!(RootgenError::FileSystem(format!(
                        "Path exists but is not a directory: {}",
                        current.display()
                    )));
                }
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to create directory {}", current.display())
                });
            }
        }
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let missing = FileRef::from(dir.path().join("nope.txt"));
        assert_eq!(read(&missing).unwrap(), None);
    }

    #[test]
    fn test_write_creates_parents_and_reads_back() {
        let dir = tempdir().unwrap();
        let target = FileRef::parts(dir.path().join("a/b/c"), "file.txt");

        write(&target, "hello").unwrap();

        assert!(dir.path().join("a/b/c").is_dir());
        assert_eq!(read(&target).unwrap().as_deref(), Some("hello"));
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let target = FileRef::from(dir.path().join("file.txt"));
        write(&target, "first").unwrap();
        write(&target, "second").unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("file.txt")).unwrap(), "second");
    }

    #[test]
    fn test_write_fails_when_ancestor_is_a_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("blocked"), "i am a file").unwrap();
        let target = FileRef::from(dir.path().join("blocked/inner.txt"));

        let err = write(&target, "x").unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_read_directory_is_an_error() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        assert!(read(&FileRef::from(dir.path().join("sub"))).is_err());
    }

    #[test]
    fn test_remove_file_and_directory() {
        let dir = tempdir().unwrap();
        let file = FileRef::from(dir.path().join("old.txt"));
        write(&file, "stale").unwrap();
        let tree = FileRef::from(dir.path().join("tree"));
        write(&FileRef::from(dir.path().join("tree/x/y.txt")), "y").unwrap();

        assert!(remove(&file).unwrap());
        assert!(remove(&tree).unwrap());
        assert!(!dir.path().join("old.txt").exists());
        assert!(!dir.path().join("tree").exists());
        assert!(!remove(&file).unwrap());
    }

    #[test]
    fn test_ensure_ancestors_tolerates_existing_dirs() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("one/two");
        ensure_ancestors(&nested).unwrap();
        ensure_ancestors(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_bytes_round_trip_and_lossy_text_read() {
        let dir = tempdir().unwrap();
        let icon = FileRef::parts(dir.path().join("assets"), "favicon.ico");
        let bytes = [0u8, 0, 1, 0, 0xff, 0xfe, 0x89];

        assert_eq!(read_bytes(&icon).unwrap(), None);
        write_bytes(&icon, &bytes).unwrap();
        assert_eq!(read_bytes(&icon).unwrap().as_deref(), Some(&bytes[..]));

        let text = read(&icon).unwrap().unwrap();
        assert!(text.contains('\u{FFFD}'));
    }
}
