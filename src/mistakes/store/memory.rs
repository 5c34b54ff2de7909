use super::{BackupReport, LoadReport, RecordStore};
use crate::error::{Result, TrackerError};
use crate::model::Record;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    records: Vec<Record>,
    saves: usize,
    fail_saves: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Makes every subsequent save fail, to exercise error reporting.
    pub fn failing(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn stored(&self) -> &[Record] {
        &self.records
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl RecordStore for InMemoryStore {
    fn load(&self) -> LoadReport {
        LoadReport::with_records(self.records.clone())
    }

    fn save(&mut self, records: &[Record]) -> Result<()> {
        if self.fail_saves {
            return Err(TrackerError::Store("in-memory store rejects writes".into()));
        }
        self.records = records.to_vec();
        self.saves += 1;
        Ok(())
    }

    fn backup(&self) -> BackupReport {
        BackupReport::default()
    }
}
