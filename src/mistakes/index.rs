//! User-facing record selection.
//!
//! Records are addressed either by their 1-based position in the stored
//! collection (`3`) or by their 8-character identifier (`1f0c9a2e`).
//! Positions shift when a record is deleted; identifiers never do.

use crate::model::{Record, ID_LEN};
use std::str::FromStr;

/// A user input selecting one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSelector {
    /// 1-based position in storage order
    Index(usize),
    Id(String),
}

impl std::fmt::Display for RecordSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordSelector::Index(i) => write!(f, "{}", i),
            RecordSelector::Id(id) => write!(f, "#{}", id),
        }
    }
}

impl FromStr for RecordSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) && s.len() < ID_LEN {
            return match s.parse::<usize>() {
                Ok(0) => Err("Positions start at 1".to_string()),
                Ok(n) => Ok(RecordSelector::Index(n)),
                Err(_) => Err(format!("Invalid position: {}", s)),
            };
        }

        if s.len() == ID_LEN && s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(RecordSelector::Id(s.to_ascii_lowercase()));
        }

        Err(format!("Invalid selector: {}", s))
    }
}

/// A record together with its 1-based storage position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub index: usize,
    pub record: Record,
}

/// Pairs every record with its storage position.
pub fn index_records(records: &[Record]) -> Vec<DisplayRecord> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| DisplayRecord {
            index: i + 1,
            record: record.clone(),
        })
        .collect()
}

/// Finds the zero-based position a selector points at.
pub fn resolve(records: &[Record], selector: &RecordSelector) -> Option<usize> {
    match selector {
        RecordSelector::Index(n) => (*n >= 1 && *n <= records.len()).then(|| n - 1),
        RecordSelector::Id(id) => records
            .iter()
            .position(|r| r.id.as_deref() == Some(id.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positions() {
        assert_eq!("3".parse(), Ok(RecordSelector::Index(3)));
        assert_eq!(" 12 ".parse(), Ok(RecordSelector::Index(12)));
        assert!("0".parse::<RecordSelector>().is_err());
    }

    #[test]
    fn parses_ids() {
        assert_eq!(
            "1F0C9A2E".parse(),
            Ok(RecordSelector::Id("1f0c9a2e".to_string()))
        );
        assert_eq!(
            "#12345678".parse(),
            Ok(RecordSelector::Id("12345678".to_string()))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<RecordSelector>().is_err());
        assert!("abc".parse::<RecordSelector>().is_err());
        assert!("xyzxyzxy".parse::<RecordSelector>().is_err());
    }

    #[test]
    fn resolves_against_records() {
        let records = vec![
            Record::new("math", "a", "b").with_id("aaaaaaaa"),
            Record::new("english", "c", "d"),
        ];
        assert_eq!(resolve(&records, &RecordSelector::Index(2)), Some(1));
        assert_eq!(resolve(&records, &RecordSelector::Index(3)), None);
        assert_eq!(
            resolve(&records, &RecordSelector::Id("aaaaaaaa".into())),
            Some(0)
        );
        assert_eq!(resolve(&records, &RecordSelector::Id("bbbbbbbb".into())), None);
    }

    #[test]
    fn indexes_in_storage_order() {
        let records = vec![Record::new("a", "a", "a"), Record::new("b", "b", "b")];
        let indexed = index_records(&records);
        assert_eq!(indexed[0].index, 1);
        assert_eq!(indexed[1].record.subject, "b");
    }
}
