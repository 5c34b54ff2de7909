//! # API Facade
//!
//! [`Journal`] is the single entry point the shell talks to. It owns the
//! in-memory collection for the lifetime of the process and a
//! [`RecordStore`] to flush it to.
//!
//! ## Role and Responsibilities
//!
//! - **Validates** user-supplied fields before any command sees them
//! - **Dispatches** to the pure functions in `commands/`
//! - **Persists** after every mutation
//! - **Returns structured types** (`CmdResult`), never prints
//!
//! A failed save is not an error of the operation: the change stays in
//! memory and the result carries an error-level message, so the shell keeps
//! running and the next successful save writes everything.
//!
//! ## Generic Over RecordStore
//!
//! - Production: `Journal<FileStore>`
//! - Testing: `Journal<InMemoryStore>`

use crate::commands::{self, CmdMessage, CmdResult, RecordEdit};
use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::index::{index_records, resolve, DisplayRecord, RecordSelector};
use crate::model::Record;
use crate::store::{LoadReport, RecordStore};
use crate::validate::validate_field;

pub struct Journal<S: RecordStore> {
    store: S,
    records: Vec<Record>,
    config: TrackerConfig,
}

impl<S: RecordStore> Journal<S> {
    /// Loads the collection from `store`. Load problems become messages.
    pub fn open(store: S, config: TrackerConfig) -> (Self, CmdResult) {
        let report = store.load();
        let mut result = CmdResult::default();
        for message in load_messages(&report) {
            result.add_message(message);
        }

        let journal = Self {
            store,
            records: report.records,
            config,
        };
        (journal, result)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn indexed(&self) -> Vec<DisplayRecord> {
        index_records(&self.records)
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn missing_ids(&self) -> usize {
        self.records.iter().filter(|r| r.id.is_none()).count()
    }

    pub fn get(&self, selector: &RecordSelector) -> Result<DisplayRecord> {
        let position = self.position(selector)?;
        Ok(DisplayRecord {
            index: position + 1,
            record: self.records[position].clone(),
        })
    }

    pub fn add(&mut self, subject: &str, mistake: &str, fix: &str) -> Result<CmdResult> {
        let max = self.config.max_input_len;
        let subject = validate_field(subject, max)?;
        let mistake = validate_field(mistake, max)?;
        let fix = validate_field(fix, max)?;

        let record = commands::add::run(
            &mut self.records,
            &subject,
            &mistake,
            &fix,
            self.config.assign_ids,
        );

        let mut result = CmdResult::default().with_affected_records(vec![record]);
        result.add_message(CmdMessage::success("Mistake added successfully!"));
        self.persist(&mut result);
        Ok(result)
    }

    /// Records matching `keyword` (all when blank), newest first, with
    /// statistics over the matching set.
    pub fn view(&self, keyword: &str) -> CmdResult {
        let mut result = CmdResult::default();
        if self.records.is_empty() {
            result.add_message(CmdMessage::info("No mistakes recorded yet."));
            return result;
        }

        let mut hits = commands::search::run(&self.records, keyword);
        if hits.is_empty() {
            result.add_message(CmdMessage::info("No matching mistakes found."));
            return result;
        }
        commands::search::sort_newest_first(&mut hits);

        let matched: Vec<Record> = hits.iter().map(|dr| dr.record.clone()).collect();
        result
            .with_statistics(commands::stats::run(&matched))
            .with_listed_records(hits)
    }

    pub fn edit(&mut self, selector: &RecordSelector, edit: &RecordEdit) -> Result<CmdResult> {
        let max = self.config.max_input_len;
        let checked = RecordEdit {
            subject: checked_replacement(&edit.subject, max)?,
            mistake: checked_replacement(&edit.mistake, max)?,
            fix: checked_replacement(&edit.fix, max)?,
        };

        let position = self.position(selector)?;
        let changed = commands::edit::run(&mut self.records[position], &checked);

        let mut result =
            CmdResult::default().with_affected_records(vec![self.records[position].clone()]);
        if changed {
            result.add_message(CmdMessage::success("Updated."));
            self.persist(&mut result);
        } else {
            result.add_message(CmdMessage::info("Nothing changed."));
        }
        Ok(result)
    }

    pub fn delete(&mut self, selector: &RecordSelector) -> Result<CmdResult> {
        let removed = commands::delete::run(&mut self.records, selector)?;

        let mut result = CmdResult::default().with_affected_records(vec![removed]);
        result.add_message(CmdMessage::success("Deleted."));
        self.persist(&mut result);
        Ok(result)
    }

    /// Assigns identifiers to records that lack one and saves if any changed.
    pub fn migrate_ids(&mut self) -> CmdResult {
        let assigned = commands::migrate::backfill_ids(&mut self.records);
        let mut result = CmdResult::default();
        if assigned > 0 {
            result.add_message(CmdMessage::info(format!(
                "Assigned identifiers to {} existing record(s).",
                assigned
            )));
            self.persist(&mut result);
        }
        result
    }

    fn position(&self, selector: &RecordSelector) -> Result<usize> {
        resolve(&self.records, selector)
            .ok_or_else(|| TrackerError::NotFound(format!("no record at {}", selector)))
    }

    fn persist(&mut self, result: &mut CmdResult) {
        if let Err(e) = self.store.save(&self.records) {
            result.add_message(CmdMessage::error(format!("Could not save changes: {}", e)));
        }
    }
}

fn checked_replacement(value: &Option<String>, max: usize) -> Result<Option<String>> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(Some(validate_field(v, max)?)),
        _ => Ok(None),
    }
}

fn load_messages(report: &LoadReport) -> Vec<CmdMessage> {
    let mut messages = Vec::new();
    if report.is_clean() {
        return messages;
    }

    if let Some(path) = &report.quarantined {
        messages.push(CmdMessage::warning(format!(
            "The data file could not be parsed and was moved to {}. Starting with an empty journal.",
            path.display()
        )));
    }
    if let Some(error) = &report.read_error {
        messages.push(CmdMessage::error(format!(
            "{}. Starting with an empty journal.",
            error
        )));
    }
    if !report.dropped.is_empty() {
        messages.push(CmdMessage::warning(format!(
            "Skipped {} invalid record(s) in the data file.",
            report.dropped.len()
        )));
    }

    messages
}
