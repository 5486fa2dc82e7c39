//! Atomic file output.
//!
//! Bytes go to a temporary file in the destination directory, are synced,
//! and are then renamed over the target. A failed run never leaves a
//! partially written artifact behind.

use std::collections::HashSet;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ReportError, Result};

/// What to do when the destination already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Refuse with [`ReportError::OutputExists`].
    #[default]
    CreateNew,
    /// Replace the existing file atomically.
    Overwrite,
}

/// Fails if any destination exists and `mode` forbids replacing it.
pub fn ensure_writable(paths: &[PathBuf], mode: WriteMode) -> Result<()> {
    if mode == WriteMode::Overwrite {
        return Ok(());
    }
    match paths.iter().find(|path| path.exists()) {
        Some(path) => Err(ReportError::OutputExists { path: path.clone() }),
        None => Ok(()),
    }
}

/// Fails if two destinations resolve to the same file.
pub fn ensure_distinct(paths: &[PathBuf]) -> Result<()> {
    let mut seen = HashSet::new();
    for path in paths {
        let resolved = std::path::absolute(path).unwrap_or_else(|_| path.clone());
        if !seen.insert(resolved) {
            return Err(ReportError::PathConflict { path: path.clone() });
        }
    }
    Ok(())
}

pub fn write_atomic(path: &Path, bytes: &[u8], mode: WriteMode) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|source| ReportError::Io {
        operation: "create directory",
        path: parent.to_path_buf(),
        source,
    })?;

    let mut temp = NamedTempFile::new_in(parent).map_err(|source| ReportError::Io {
        operation: "create temporary file in",
        path: parent.to_path_buf(),
        source,
    })?;
    temp.write_all(bytes).map_err(|source| ReportError::Io {
        operation: "write",
        path: temp.path().to_path_buf(),
        source,
    })?;
    temp.as_file().sync_all().map_err(|source| ReportError::Io {
        operation: "sync",
        path: temp.path().to_path_buf(),
        source,
    })?;

    let persisted = match mode {
        WriteMode::Overwrite => temp.persist(path),
        WriteMode::CreateNew => temp.persist_noclobber(path),
    };
    persisted.map_err(|err| {
        if err.error.kind() == ErrorKind::AlreadyExists {
            ReportError::OutputExists {
                path: path.to_path_buf(),
            }
        } else {
            ReportError::AtomicWriteFailed {
                path: path.to_path_buf(),
                source: err.error,
            }
        }
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.csv");
        write_atomic(&path, b"a,b\n", WriteMode::CreateNew).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\n");
    }

    #[test]
    fn refuses_existing_file_without_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        fs::write(&path, "old").unwrap();
        let err = write_atomic(&path, b"new", WriteMode::CreateNew).unwrap_err();
        assert!(matches!(err, ReportError::OutputExists { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn overwrite_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        fs::write(&path, "old").unwrap();
        write_atomic(&path, b"new", WriteMode::Overwrite).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn ensure_writable_reports_first_existing_path() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("b.csv");
        fs::write(&existing, "").unwrap();
        let paths = vec![dir.path().join("a.csv"), existing.clone()];
        let err = ensure_writable(&paths, WriteMode::CreateNew).unwrap_err();
        assert!(matches!(err, ReportError::OutputExists { path } if path == existing));
        assert!(ensure_writable(&paths, WriteMode::Overwrite).is_ok());
    }

    #[test]
    fn ensure_distinct_rejects_the_same_file_twice() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("ekokom.xlsx");
        let snapshot = dir.path().join("snapshot.json");
        assert!(ensure_distinct(&[report.clone(), snapshot]).is_ok());

        let aliased = dir.path().join(".").join("ekokom.xlsx");
        let err = ensure_distinct(&[report, aliased.clone()]).unwrap_err();
        assert!(matches!(err, ReportError::PathConflict { path } if path == aliased));
    }
}
