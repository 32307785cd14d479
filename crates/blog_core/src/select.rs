use std::cmp::Reverse;

use crate::record::ContentRecord;

/// How the selected set was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// At least one record was published.
    Published,
    /// Nothing was published, so every input record was returned instead.
    FailOpen,
    /// The input itself was empty.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub records: Vec<ContentRecord>,
    pub outcome: SelectionOutcome,
}

/// Published records, most recent first.
///
/// When nothing is published but the input is not empty, all records are
/// returned rather than an empty feed. An empty input stays empty.
pub fn select(records: Vec<ContentRecord>) -> Vec<ContentRecord> {
    select_with_outcome(records).records
}

pub fn select_with_outcome(records: Vec<ContentRecord>) -> Selection {
    if records.is_empty() {
        return Selection {
            records,
            outcome: SelectionOutcome::Empty,
        };
    }

    let has_published = records.iter().any(|r| r.published);
    let (mut records, outcome) = if has_published {
        let published = records.into_iter().filter(|r| r.published).collect();
        (published, SelectionOutcome::Published)
    } else {
        (records, SelectionOutcome::FailOpen)
    };

    sort_by_recency(&mut records);
    Selection { records, outcome }
}

/// Stable descending sort on date; unparseable dates sort as the oldest.
pub fn sort_by_recency(records: &mut [ContentRecord]) {
    records.sort_by_cached_key(|r| Reverse(r.sort_key()));
}

/// First record with a matching id, published or not.
pub fn find_by_id<'a>(records: &'a [ContentRecord], id: &str) -> Option<&'a ContentRecord> {
    records.iter().find(|r| r.id == id)
}

/// Published records whose title, body or any tag contains `query`,
/// ignoring case. A blank query returns every published record.
///
/// Unlike [`select`], there is no fallback: a search can legitimately be empty.
pub fn search<'a>(records: &'a [ContentRecord], query: &str) -> Vec<&'a ContentRecord> {
    let needle = query.trim().to_lowercase();
    records
        .iter()
        .filter(|r| r.published)
        .filter(|r| needle.is_empty() || matches_query(r, &needle))
        .collect()
}

fn matches_query(record: &ContentRecord, needle: &str) -> bool {
    record.title.to_lowercase().contains(needle)
        || record.body.to_lowercase().contains(needle)
        || record
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}
