use crate::model::{mint_id, taken_ids, Record};

/// Appends a new record dated today and returns a copy of it.
///
/// Inputs are assumed to be validated already. The subject is trimmed and
/// lower-cased, the descriptions trimmed. With `assign_id` the record gets an
/// identifier that no other record in `records` uses.
pub fn run(
    records: &mut Vec<Record>,
    subject: &str,
    mistake: &str,
    fix: &str,
    assign_id: bool,
) -> Record {
    let mut record = Record::new(subject, mistake, fix);
    if assign_id {
        record.id = Some(mint_id(&taken_ids(records)));
    }
    records.push(record.clone());
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[test]
    fn add_creates_normalized_entry() {
        let mut records = Vec::new();
        let record = run(&mut records, "Math", "Wrong answer", "Check work", false);

        assert_eq!(records.len(), 1);
        assert_eq!(record.subject, "math");
        assert_eq!(record.mistake, "Wrong answer");
        assert_eq!(record.date, Local::now().date_naive());
        assert_eq!(record.id, None);
        assert_eq!(records[0], record);
    }

    #[test]
    fn add_trims_descriptions() {
        let mut records = Vec::new();
        let record = run(&mut records, " Physics ", "  units  ", " convert first ", false);
        assert_eq!(record.subject, "physics");
        assert_eq!(record.mistake, "units");
        assert_eq!(record.fix, "convert first");
    }

    #[test]
    fn add_assigns_unique_ids() {
        let mut records = Vec::new();
        for _ in 0..20 {
            run(&mut records, "math", "m", "f", true);
        }
        let ids = taken_ids(&records);
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn add_appends_at_the_end() {
        let mut records = Vec::new();
        run(&mut records, "math", "first", "f", false);
        run(&mut records, "math", "second", "f", false);
        assert_eq!(records[1].mistake, "second");
    }
}
