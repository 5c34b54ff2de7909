use super::{BackupReport, DroppedRecord, LoadReport, RecordStore, StorePaths};
use crate::error::{Result, TrackerError};
use crate::model::Record;
use chrono::Utc;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default number of backups kept by a [`FileStore`].
pub const DEFAULT_MAX_BACKUPS: usize = 20;

// Fixed width so that lexical order of names is chronological order.
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%6f";

pub struct FileStore {
    paths: StorePaths,
    max_backups: usize,
}

impl FileStore {
    pub fn new(paths: StorePaths) -> Self {
        Self {
            paths,
            max_backups: DEFAULT_MAX_BACKUPS,
        }
    }

    pub fn with_max_backups(mut self, max_backups: usize) -> Self {
        self.max_backups = max_backups;
        self
    }

    /// Sibling file the next save is written to before being renamed into place.
    pub fn tmp_path(&self) -> PathBuf {
        self.data_dir()
            .join(format!("{}.tmp", self.paths.data_file_name()))
    }

    fn data_dir(&self) -> PathBuf {
        parent_dir(&self.paths.data_file)
    }

    fn backup_prefix(&self) -> String {
        format!("{}.", self.paths.data_file_name())
    }

    fn quarantine(&self, reason: &str) -> LoadReport {
        let name = self.paths.data_file_name();
        let dest = unique_path(&self.data_dir(), |ts| format!("{}.corrupt.{}", name, ts));

        match fs::rename(&self.paths.data_file, &dest) {
            Ok(()) => {
                warn!(
                    path = %self.paths.data_file.display(),
                    quarantined = %dest.display(),
                    reason,
                    "data file is malformed, moved aside"
                );
                LoadReport {
                    quarantined: Some(dest),
                    ..LoadReport::default()
                }
            }
            Err(e) => {
                warn!(path = %self.paths.data_file.display(), error = %e, "could not quarantine malformed data file");
                LoadReport {
                    read_error: Some(format!(
                        "{} is malformed ({}) and could not be moved aside: {}",
                        self.paths.data_file.display(),
                        reason,
                        e
                    )),
                    ..LoadReport::default()
                }
            }
        }
    }

    fn write_atomically(&self, content: &[u8]) -> io::Result<()> {
        let tmp = self.tmp_path();
        let written = write_synced(&tmp, content)
            .and_then(|_| fs::rename(&tmp, &self.paths.data_file));

        if let Err(e) = written {
            if tmp.is_file() {
                let _ = fs::remove_file(&tmp);
            }
            return Err(e);
        }

        sync_dir(&self.data_dir());
        Ok(())
    }

    fn prune_backups(&self) -> usize {
        let entries = match fs::read_dir(&self.paths.backup_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %self.paths.backup_dir.display(), error = %e, "could not list backups");
                return 0;
            }
        };

        let prefix = self.backup_prefix();
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| {
                name.len() > prefix.len() + ".bak".len()
                    && name.starts_with(&prefix)
                    && name.ends_with(".bak")
            })
            .collect();
        names.sort_by(|a, b| b.cmp(a));

        let mut pruned = 0;
        for name in names.iter().skip(self.max_backups) {
            let path = self.paths.backup_dir.join(name);
            match fs::remove_file(&path) {
                Ok(()) => pruned += 1,
                Err(e) => warn!(path = %path.display(), error = %e, "could not remove old backup"),
            }
        }
        pruned
    }
}

impl RecordStore for FileStore {
    fn load(&self) -> LoadReport {
        let path = &self.paths.data_file;
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return LoadReport::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read data file");
                return LoadReport {
                    read_error: Some(format!("could not read {}: {}", path.display(), e)),
                    ..LoadReport::default()
                };
            }
        };

        let entries = match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => return self.quarantine("top-level value is not an array"),
            Err(e) => return self.quarantine(&e.to_string()),
        };

        let mut report = LoadReport::default();
        for (position, entry) in entries.into_iter().enumerate() {
            match Record::try_from(entry) {
                Ok(record) => report.records.push(record),
                Err(defect) => {
                    warn!(position, %defect, "dropping invalid record");
                    report.dropped.push(DroppedRecord { position, defect });
                }
            }
        }

        debug!(
            path = %path.display(),
            loaded = report.records.len(),
            dropped = report.dropped.len(),
            "loaded records"
        );
        report
    }

    fn save(&mut self, records: &[Record]) -> Result<()> {
        self.backup();

        let mut content = serde_json::to_string_pretty(records).map_err(TrackerError::Serialization)?;
        content.push('\n');

        let dir = self.data_dir();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(TrackerError::Io)?;
        }

        if let Err(e) = self.write_atomically(content.as_bytes()) {
            warn!(path = %self.paths.data_file.display(), error = %e, "save failed");
            return Err(TrackerError::Io(e));
        }

        debug!(path = %self.paths.data_file.display(), records = records.len(), "saved records");
        Ok(())
    }

    fn backup(&self) -> BackupReport {
        if !self.paths.data_file.is_file() {
            return BackupReport::default();
        }

        if let Err(e) = fs::create_dir_all(&self.paths.backup_dir) {
            warn!(dir = %self.paths.backup_dir.display(), error = %e, "could not create backup directory");
            return BackupReport::default();
        }

        let name = self.paths.data_file_name();
        let dest = unique_path(&self.paths.backup_dir, |ts| format!("{}.{}.bak", name, ts));
        if let Err(e) = fs::copy(&self.paths.data_file, &dest) {
            warn!(path = %dest.display(), error = %e, "backup failed");
            return BackupReport::default();
        }

        let pruned = self.prune_backups();
        debug!(path = %dest.display(), pruned, "backup written");
        BackupReport {
            created: Some(dest),
            pruned,
        }
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// A path in `dir` named from the current timestamp that does not exist yet.
fn unique_path(dir: &Path, name_for: impl Fn(&str) -> String) -> PathBuf {
    loop {
        let ts = Utc::now().format(TIMESTAMP_FORMAT).to_string();
        let candidate = dir.join(name_for(&ts));
        if !candidate.exists() {
            return candidate;
        }
    }
}

fn write_synced(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    file.flush()?;
    file.sync_all()
}

#[cfg(unix)]
fn sync_dir(dir: &Path) {
    if let Ok(handle) = File::open(dir) {
        let _ = handle.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}
