use crate::validate::normalize_subject;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Calendar date format used on disk and on screen.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of a record identifier.
pub const ID_LEN: usize = 8;

const MANDATORY_FIELDS: [&str; 4] = ["subject", "mistake", "fix", "date"];

/// One logged mistake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub subject: String,
    pub mistake: String,
    pub fix: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
}

impl Record {
    /// Builds a record dated today. Inputs are expected to be validated already;
    /// they are trimmed and the subject is lower-cased here.
    pub fn new(subject: &str, mistake: &str, fix: &str) -> Self {
        Self {
            id: None,
            subject: normalize_subject(subject),
            mistake: mistake.trim().to_string(),
            fix: fix.trim().to_string(),
            date: Local::now().date_naive(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Mints an 8-character identifier not present in `taken`.
pub fn mint_id(taken: &HashSet<String>) -> String {
    loop {
        let candidate: String = Uuid::new_v4().simple().to_string()[..ID_LEN].to_string();
        if !taken.contains(&candidate) {
            return candidate;
        }
    }
}

/// Collects the identifiers already in use.
pub fn taken_ids(records: &[Record]) -> HashSet<String> {
    records.iter().filter_map(|r| r.id.clone()).collect()
}

/// Why a stored entry was rejected at the load boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordDefect {
    NotAnObject,
    MissingField(&'static str),
    InvalidField(&'static str),
    BadDate(String),
}

impl fmt::Display for RecordDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordDefect::NotAnObject => write!(f, "entry is not an object"),
            RecordDefect::MissingField(name) => write!(f, "missing field `{}`", name),
            RecordDefect::InvalidField(name) => write!(f, "field `{}` is not a non-empty string", name),
            RecordDefect::BadDate(date) => write!(f, "date `{}` is not {}", date, DATE_FORMAT),
        }
    }
}

impl TryFrom<Value> for Record {
    type Error = RecordDefect;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(map) = value else {
            return Err(RecordDefect::NotAnObject);
        };

        for name in MANDATORY_FIELDS {
            if !map.contains_key(name) {
                return Err(RecordDefect::MissingField(name));
            }
        }

        let subject = text_field(&map, "subject")?;
        let mistake = text_field(&map, "mistake")?;
        let fix = text_field(&map, "fix")?;
        let raw_date = text_field(&map, "date")?;
        let date = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT)
            .map_err(|_| RecordDefect::BadDate(raw_date.clone()))?;

        let id = map
            .get("id")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Record {
            id,
            subject,
            mistake,
            fix,
            date,
        })
    }
}

fn text_field(map: &Map<String, Value>, name: &'static str) -> Result<String, RecordDefect> {
    match map.get(name).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
        _ => Err(RecordDefect::InvalidField(name)),
    }
}

mod date_format {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_record_normalizes_fields() {
        let record = Record::new("  Math ", " Wrong answer ", "Check work ");
        assert_eq!(record.subject, "math");
        assert_eq!(record.mistake, "Wrong answer");
        assert_eq!(record.fix, "Check work");
        assert_eq!(record.id, None);
    }

    #[test]
    fn serializes_with_stable_field_names() {
        let record = Record::new("math", "m", "f")
            .with_id("abcd1234")
            .with_date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "abcd1234",
                "subject": "math",
                "mistake": "m",
                "fix": "f",
                "date": "2024-01-15"
            })
        );
    }

    #[test]
    fn omits_absent_id() {
        let record = Record::new("math", "m", "f");
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("id").is_none());
    }

    #[test]
    fn rejects_entry_missing_fields() {
        let defect = Record::try_from(json!({"subject": "math"})).unwrap_err();
        assert_eq!(defect, RecordDefect::MissingField("mistake"));
    }

    #[test]
    fn rejects_wrong_date_format() {
        let defect = Record::try_from(json!({
            "subject": "math", "mistake": "m", "fix": "f", "date": "15-01-2024"
        }))
        .unwrap_err();
        assert_eq!(defect, RecordDefect::BadDate("15-01-2024".into()));
    }

    #[test]
    fn rejects_non_string_fields() {
        let defect = Record::try_from(json!({
            "subject": 3, "mistake": "m", "fix": "f", "date": "2024-01-15"
        }))
        .unwrap_err();
        assert_eq!(defect, RecordDefect::InvalidField("subject"));
    }

    #[test]
    fn rejects_non_objects() {
        assert_eq!(
            Record::try_from(json!("math")).unwrap_err(),
            RecordDefect::NotAnObject
        );
    }

    #[test]
    fn keeps_optional_id() {
        let record = Record::try_from(json!({
            "id": "0badc0de", "subject": "math", "mistake": "m", "fix": "f", "date": "2024-01-15"
        }))
        .unwrap();
        assert_eq!(record.id.as_deref(), Some("0badc0de"));
    }

    #[test]
    fn minted_ids_avoid_taken_ones() {
        let mut taken = HashSet::new();
        for _ in 0..50 {
            let id = mint_id(&taken);
            assert_eq!(id.len(), ID_LEN);
            assert!(taken.insert(id));
        }
    }
}
