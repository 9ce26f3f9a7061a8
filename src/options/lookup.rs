//! Record lookup by semantic id, tag and title
//!
//! All lookups walk the list in order and stop at the first hit.

use crate::aas::{MatchMode, Reference};
use super::record::OptionsRecord;

/// First record whose template semantic id matches `semantic_id`.
///
/// A missing or empty query finds nothing.
pub fn find_by_semantic_id<'a, R: OptionsRecord>(
    records: &'a [R],
    semantic_id: Option<&Reference>,
    mode: MatchMode,
) -> Option<&'a R> {
    let semantic_id = semantic_id.filter(|sid| !sid.is_empty())?;
    records.iter().find(|record| {
        record
            .key_semantic_id()
            .is_some_and(|key| semantic_id.matches_key(key, mode))
    })
}

pub fn find_by_tag<'a, R: OptionsRecord>(records: &'a [R], tag: &str) -> Option<&'a R> {
    records.iter().find(|record| record.tag() == tag)
}

pub fn find_by_title<'a, R: OptionsRecord>(records: &'a [R], title: &str) -> Option<&'a R> {
    let title = title.trim();
    records.iter().find(|record| record.title().trim() == title)
}
