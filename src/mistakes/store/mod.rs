//! # Storage Layer
//!
//! The [`RecordStore`] trait is the only way the rest of the crate touches
//! persisted records. The whole collection is read and written at once; there
//! are at most a few thousand records, so nothing is incremental.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: the production store.
//!   - Records in a single JSON array file (the canonical file)
//!   - Every save writes a sibling `.tmp` file and renames it into place
//!   - Every save first copies the previous canonical file into the backup
//!     directory, keeping the newest `max_backups` copies
//!   - Unparseable files are renamed aside to `<name>.corrupt.<timestamp>`
//!
//! - [`memory::InMemoryStore`]: no persistence, used by command and API tests.
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── mistakes.json                          # canonical file (JSON array)
//! ├── mistakes.json.corrupt.20240115_101500  # quarantined file, never deleted
//! ├── config.json                            # optional settings
//! └── backups/
//!     ├── mistakes.json.20240115_101502_000131.bak
//!     └── mistakes.json.20240115_101507_419002.bak
//! ```
//!
//! Loading never fails outward. Problems are collected in a [`LoadReport`]
//! so the caller decides how to surface them.

use crate::error::Result;
use crate::model::{Record, RecordDefect};
use std::path::PathBuf;

pub mod fs;
pub mod memory;

/// Default name of the canonical file.
pub const DATA_FILENAME: &str = "mistakes.json";

/// Default name of the backup directory, relative to the canonical file.
pub const BACKUP_DIRNAME: &str = "backups";

/// Where a store keeps its canonical file and backups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub data_file: PathBuf,
    pub backup_dir: PathBuf,
}

impl StorePaths {
    /// Paths for `data_file`, with backups in a `backups/` directory beside it.
    pub fn for_data_file(data_file: impl Into<PathBuf>) -> Self {
        let data_file = data_file.into();
        let backup_dir = data_file
            .parent()
            .map(|p| p.join(BACKUP_DIRNAME))
            .unwrap_or_else(|| PathBuf::from(BACKUP_DIRNAME));
        Self {
            data_file,
            backup_dir,
        }
    }

    pub fn with_backup_dir(mut self, backup_dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = backup_dir.into();
        self
    }

    /// File name of the canonical file, used as the prefix for backups and sidecars.
    pub fn data_file_name(&self) -> String {
        self.data_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DATA_FILENAME.to_string())
    }
}

/// An entry excluded while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRecord {
    /// Zero-based position in the stored array
    pub position: usize,
    pub defect: RecordDefect,
}

/// Outcome of a load.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub records: Vec<Record>,
    pub dropped: Vec<DroppedRecord>,
    /// Set when the canonical file could not be parsed and was renamed aside
    pub quarantined: Option<PathBuf>,
    /// Set when the canonical file exists but could not be read
    pub read_error: Option<String>,
}

impl LoadReport {
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty() && self.quarantined.is_none() && self.read_error.is_none()
    }
}

/// Outcome of a backup attempt.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BackupReport {
    pub created: Option<PathBuf>,
    pub pruned: usize,
}

/// Abstract interface for record storage.
pub trait RecordStore {
    /// Read the whole collection. Never fails; problems land in the report.
    fn load(&self) -> LoadReport;

    /// Replace the stored collection with `records`.
    fn save(&mut self, records: &[Record]) -> Result<()>;

    /// Copy the current canonical data aside and apply retention. Never fails.
    fn backup(&self) -> BackupReport;
}
