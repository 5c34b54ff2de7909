use crate::model::{mint_id, taken_ids, Record};

/// Gives every record without an identifier a fresh unique one.
///
/// Returns how many identifiers were assigned. Existing identifiers are left
/// alone, duplicates included.
pub fn backfill_ids(records: &mut [Record]) -> usize {
    let mut taken = taken_ids(records);
    let mut assigned = 0;

    for record in records.iter_mut().filter(|r| r.id.is_none()) {
        let id = mint_id(&taken);
        taken.insert(id.clone());
        record.id = Some(id);
        assigned += 1;
    }

    assigned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_only_missing_ids() {
        let mut records = vec![
            Record::new("math", "a", "f").with_id("11111111"),
            Record::new("math", "b", "f"),
            Record::new("math", "c", "f"),
        ];

        assert_eq!(backfill_ids(&mut records), 2);
        assert_eq!(records[0].id.as_deref(), Some("11111111"));
        assert!(records.iter().all(|r| r.id.is_some()));
        assert_eq!(taken_ids(&records).len(), 3);
    }

    #[test]
    fn nothing_to_do_when_complete() {
        let mut records = vec![Record::new("math", "a", "f").with_id("11111111")];
        assert_eq!(backfill_ids(&mut records), 0);
    }
}
