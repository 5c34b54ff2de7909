use crate::error::{Result, TrackerError};
use crate::index::{resolve, RecordSelector};
use crate::model::Record;

/// Removes exactly one record and returns it.
pub fn run(records: &mut Vec<Record>, selector: &RecordSelector) -> Result<Record> {
    let position = resolve(records, selector).ok_or_else(|| {
        TrackerError::NotFound(format!("no record at {}", selector))
    })?;
    Ok(records.remove(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record::new("math", "first", "f").with_id("00000001"),
            Record::new("math", "second", "f"),
            Record::new("english", "third", "f").with_id("00000003"),
        ]
    }

    #[test]
    fn deletes_by_position() {
        let mut records = sample();
        let removed = run(&mut records, &RecordSelector::Index(2)).unwrap();

        assert_eq!(removed.mistake, "second");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].mistake, "third");
    }

    #[test]
    fn deletes_by_id() {
        let mut records = sample();
        let removed = run(&mut records, &RecordSelector::Id("00000003".into())).unwrap();

        assert_eq!(removed.mistake, "third");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn missing_record_is_not_found() {
        let mut records = sample();
        let result = run(&mut records, &RecordSelector::Index(9));

        assert!(matches!(result, Err(TrackerError::NotFound(_))));
        assert_eq!(records.len(), 3);

        let result = run(&mut records, &RecordSelector::Id("ffffffff".into()));
        assert!(matches!(result, Err(TrackerError::NotFound(_))));
    }
}
