//! Undo manifest
//!
//! After a generation run, the tracked files are saved next to the source
//! JSON file as `<source>.undo.json`, a pretty-printed JSON array of paths.
//! An undo run deletes every listed file and then the manifest itself. If any
//! file could not be deleted the manifest stays, so the undo can be retried.

use migjson_core::{EngineError, EngineResult};
use std::path::{Path, PathBuf};

/// Suffix appended to the source file path to name its manifest
pub const MANIFEST_SUFFIX: &str = ".undo.json";

/// Manifest path for a source JSON file: `schema.json` → `schema.json.undo.json`
pub fn manifest_path(source: &Path) -> PathBuf {
    let mut path = source.as_os_str().to_owned();
    path.push(MANIFEST_SUFFIX);
    PathBuf::from(path)
}

// ============================================================================
// Write
// ============================================================================

/// Write the manifest listing `files`.
///
/// Returns `DirectoryUnwritable` if the manifest cannot be written.
pub fn write_manifest(path: &Path, files: &[PathBuf]) -> EngineResult<()> {
    let entries: Vec<String> = files
        .iter()
        .map(|f| f.to_string_lossy().into_owned())
        .collect();
    let json = serde_json::to_string_pretty(&entries)?;

    std::fs::write(path, json).map_err(|e| EngineError::DirectoryUnwritable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::info!("Wrote undo manifest {} ({} file(s))", path.display(), files.len());
    Ok(())
}

// ============================================================================
// Read
// ============================================================================

/// Read the file list from a manifest
pub fn read_manifest(path: &Path) -> EngineResult<Vec<PathBuf>> {
    let unreadable = |message: String| EngineError::ManifestUnreadable {
        path: path.to_path_buf(),
        message,
    };

    let json = std::fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;
    let entries: Vec<String> =
        serde_json::from_str(&json).map_err(|e| unreadable(e.to_string()))?;

    Ok(entries.into_iter().map(PathBuf::from).collect())
}

// ============================================================================
// Undo
// ============================================================================

/// Outcome of an undo run
#[derive(Debug, Default)]
pub struct UndoReport {
    /// Files that were deleted
    pub deleted: Vec<PathBuf>,

    /// One `FileUndeletable` per file that could not be deleted
    pub failures: Vec<EngineError>,

    /// Whether the manifest itself was removed
    pub manifest_removed: bool,
}

impl UndoReport {
    /// Check if every listed file was deleted
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Delete every file listed in the manifest at `path`.
///
/// Fails with `ManifestUnreadable` if the manifest is missing or corrupt.
/// Files that cannot be deleted, the manifest included, are collected in the
/// report and do not stop the remaining deletions.
pub fn undo(path: &Path) -> EngineResult<UndoReport> {
    let files = read_manifest(path)?;
    let mut report = UndoReport::default();

    for file in files {
        match std::fs::remove_file(&file) {
            Ok(()) => {
                tracing::debug!("Deleted {}", file.display());
                report.deleted.push(file);
            }
            Err(e) => {
                tracing::warn!("Could not delete {}: {}", file.display(), e);
                report.failures.push(EngineError::FileUndeletable {
                    path: file,
                    message: e.to_string(),
                });
            }
        }
    }

    if report.is_complete() {
        match std::fs::remove_file(path) {
            Ok(()) => report.manifest_removed = true,
            // Already deleted as one of the listed files
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => report.manifest_removed = true,
            Err(e) => {
                tracing::warn!("Could not delete undo manifest {}: {}", path.display(), e);
                report.failures.push(EngineError::FileUndeletable {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_manifest_path() {
        assert_eq!(
            manifest_path(Path::new("database/schema.json")),
            PathBuf::from("database/schema.json.undo.json")
        );
    }

    #[test]
    fn test_write_and_read_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("schema.json.undo.json");
        let files = vec![
            PathBuf::from("app/User.php"),
            PathBuf::from("database/migrations/2016_01_01_000000_create_users_table.php"),
        ];

        write_manifest(&path, &files).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"app/User.php\""), "slashes must stay unescaped");
        assert!(raw.contains('\n'), "manifest should be pretty-printed");
        assert_eq!(read_manifest(&path).unwrap(), files);
    }

    #[test]
    fn test_write_manifest_unwritable() {
        let temp_dir = TempDir::new().unwrap();
        // A directory in the manifest's place cannot be written as a file
        let path = temp_dir.path().join("schema.json.undo.json");
        std::fs::create_dir(&path).unwrap();

        let result = write_manifest(&path, &[PathBuf::from("app/User.php")]);
        assert!(matches!(result, Err(EngineError::DirectoryUnwritable { .. })));
    }

    #[test]
    fn test_read_missing_or_corrupt_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.undo.json");
        assert!(matches!(
            read_manifest(&missing),
            Err(EngineError::ManifestUnreadable { .. })
        ));

        let corrupt = temp_dir.path().join("corrupt.undo.json");
        std::fs::write(&corrupt, "{\"not\": \"a list\"}").unwrap();
        assert!(matches!(
            read_manifest(&corrupt),
            Err(EngineError::ManifestUnreadable { .. })
        ));
    }

    #[test]
    fn test_undo_deletes_files_and_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.php");
        let b = temp_dir.path().join("b.php");
        std::fs::write(&a, "<?php").unwrap();
        std::fs::write(&b, "<?php").unwrap();

        let path = temp_dir.path().join("schema.json.undo.json");
        write_manifest(&path, &[a.clone(), b.clone()]).unwrap();

        let report = undo(&path).unwrap();
        assert_eq!(report.deleted, vec![a.clone(), b.clone()]);
        assert!(report.is_complete());
        assert!(report.manifest_removed);
        assert!(!a.exists());
        assert!(!b.exists());
        assert!(!path.exists());

        assert!(matches!(
            undo(&path),
            Err(EngineError::ManifestUnreadable { .. })
        ));
    }

    #[test]
    fn test_undo_keeps_manifest_on_failure() {
        let temp_dir = TempDir::new().unwrap();
        let present = temp_dir.path().join("present.php");
        let gone = temp_dir.path().join("gone.php");
        std::fs::write(&present, "<?php").unwrap();

        let path = temp_dir.path().join("schema.json.undo.json");
        write_manifest(&path, &[gone.clone(), present.clone()]).unwrap();

        let report = undo(&path).unwrap();
        assert_eq!(report.deleted, vec![present.clone()]);
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            &report.failures[0],
            EngineError::FileUndeletable { path: p, .. } if *p == gone
        ));
        assert!(!report.manifest_removed);
        assert!(path.exists());
        assert!(!present.exists());
    }

    #[test]
    fn test_undo_manifest_listing_itself() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.php");
        std::fs::write(&a, "<?php").unwrap();

        let path = temp_dir.path().join("schema.json.undo.json");
        write_manifest(&path, &[a.clone(), path.clone()]).unwrap();

        let report = undo(&path).unwrap();
        assert_eq!(report.deleted, vec![a.clone(), path.clone()]);
        assert!(report.is_complete());
        assert!(report.manifest_removed);
        assert!(!a.exists());
        assert!(!path.exists());
    }
}
