use crate::model::Record;
use crate::validate::normalize_subject;

/// Replacement values for a record. `None` or blank keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordEdit {
    pub subject: Option<String>,
    pub mistake: Option<String>,
    pub fix: Option<String>,
}

impl RecordEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn mistake(mut self, mistake: impl Into<String>) -> Self {
        self.mistake = Some(mistake.into());
        self
    }

    pub fn fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }
}

fn replacement(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Applies `edit` in place. Returns whether any field changed.
pub fn run(record: &mut Record, edit: &RecordEdit) -> bool {
    let mut changed = false;

    if let Some(subject) = replacement(&edit.subject) {
        let subject = normalize_subject(subject);
        changed |= record.subject != subject;
        record.subject = subject;
    }
    if let Some(mistake) = replacement(&edit.mistake) {
        changed |= record.mistake != mistake;
        record.mistake = mistake.to_string();
    }
    if let Some(fix) = replacement(&edit.fix) {
        changed |= record.fix != fix;
        record.fix = fix.to_string();
    }

    changed
}
