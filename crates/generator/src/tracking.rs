//! Tracking of files written by the external generator
//!
//! The generator does not report what it wrote. Instead, the run start time
//! is recorded and every file in the watched directories modified at or
//! after it is attributed to the run. Timestamps are compared in whole
//! seconds, so a file written in the same second the run started counts.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Directories the Laravel generators write into, relative to the project root
pub const DEFAULT_WATCH_DIRS: &[&str] = &["app", "database/migrations"];

/// Moment a generation run started
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RunStart(DateTime<Utc>);

impl RunStart {
    /// Record the current time
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Use a fixed time
    pub fn at(time: DateTime<Utc>) -> Self {
        Self(time)
    }

    /// The recorded time
    pub fn time(&self) -> DateTime<Utc> {
        self.0
    }

    /// Check if a modification time belongs to this run
    pub fn includes(&self, modified: SystemTime) -> bool {
        DateTime::<Utc>::from(modified).timestamp() >= self.0.timestamp()
    }
}

/// List files directly inside `dirs` modified at or after `since`.
///
/// Directories are scanned in the given order, without recursion, files
/// sorted by name. Directories that do not exist are skipped.
pub fn scan_generated_files(dirs: &[PathBuf], since: RunStart) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for dir in dirs {
        if !dir.is_dir() {
            tracing::warn!("Watched directory {} does not exist", dir.display());
            continue;
        }

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            if is_modified_since(entry.path(), since) {
                files.push(entry.into_path());
            }
        }
    }

    tracing::debug!("Found {} file(s) written since {}", files.len(), since.time());
    files
}

fn is_modified_since(path: &Path, since: RunStart) -> bool {
    match std::fs::metadata(path).and_then(|m| m.modified()) {
        Ok(modified) => since.includes(modified),
        Err(e) => {
            tracing::warn!("Could not read modification time of {}: {}", path.display(), e);
            false
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
