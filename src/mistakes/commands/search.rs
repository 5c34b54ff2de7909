use crate::index::{index_records, DisplayRecord};
use crate::model::Record;

/// Records whose subject, mistake or fix contains `keyword`, ignoring case.
///
/// Storage order is preserved and each hit keeps its storage position.
/// A blank keyword matches every record.
pub fn run(records: &[Record], keyword: &str) -> Vec<DisplayRecord> {
    let keyword = keyword.trim().to_lowercase();

    index_records(records)
        .into_iter()
        .filter(|dr| keyword.is_empty() || record_matches(&dr.record, &keyword))
        .collect()
}

fn record_matches(record: &Record, keyword_lower: &str) -> bool {
    [&record.subject, &record.mistake, &record.fix]
        .iter()
        .any(|field| field.to_lowercase().contains(keyword_lower))
}

/// Newest first; records from the same day keep their relative order.
pub fn sort_newest_first(records: &mut [DisplayRecord]) {
    records.sort_by(|a, b| b.record.date.cmp(&a.record.date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(subject: &str, mistake: &str, fix: &str, day: u32) -> Record {
        Record::new(subject, mistake, fix).with_date(NaiveDate::from_ymd_opt(2024, 1, day).unwrap())
    }

    fn sample() -> Vec<Record> {
        vec![
            record("math", "Wrong formula", "Check formula", 15),
            record("math", "Calculation error", "Double check", 16),
            record("english", "Grammar issue", "Review rules", 17),
        ]
    }

    #[test]
    fn matches_any_field_case_insensitively() {
        let records = sample();

        let hits = run(&records, "CHECK");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].index, 1);
        assert_eq!(hits[1].index, 2);

        let hits = run(&records, "English");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].record.mistake, "Grammar issue");

        let hits = run(&records, "grammar");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn no_match_is_empty() {
        assert!(run(&sample(), "chemistry").is_empty());
    }

    #[test]
    fn blank_keyword_matches_all() {
        assert_eq!(run(&sample(), "  ").len(), 3);
    }

    #[test]
    fn sorts_newest_first_stably() {
        let records = vec![
            record("a", "old", "f", 1),
            record("b", "same day first", "f", 5),
            record("c", "same day second", "f", 5),
        ];
        let mut hits = run(&records, "");
        sort_newest_first(&mut hits);

        let order: Vec<_> = hits.iter().map(|h| h.record.mistake.as_str()).collect();
        assert_eq!(order, vec!["same day first", "same day second", "old"]);
    }
}
