use crate::model::Record;

/// How many records share a subject, and their share of the total.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectStat {
    pub subject: String,
    pub count: usize,
    /// Percentage of the total, 0.0..=100.0
    pub percentage: f64,
}

/// Groups records by subject, most frequent first.
///
/// Subjects with equal counts keep the order in which they first appear.
pub fn run(records: &[Record]) -> Vec<SubjectStat> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut counts: Vec<(&str, usize)> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|(s, _)| *s == record.subject) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.subject.as_str(), 1)),
        }
    }

    // sort_by is stable, so ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total = records.len() as f64;
    counts
        .into_iter()
        .map(|(subject, count)| SubjectStat {
            subject: subject.to_string(),
            count,
            percentage: count as f64 / total * 100.0,
        })
        .collect()
}
