//! Duplicate grouping over note records.
//!
//! # Responsibility
//! - Bucket records by `EquivalenceKey` in one in-memory pass.
//! - Report group statistics and a bounded, display-ready preview.
//!
//! # Invariants
//! - Groups appear in first-seen key order; members keep input order.
//! - Groups with a single member never reach the report.
//! - Preview truncation never changes keys or counts.
//! - The input slice is never mutated.

use crate::dedup::normalize::{flatten_line_breaks, truncate_chars};
use crate::model::note::{EquivalenceKey, NoteId, NoteRecord};
use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_PREVIEW_LIMIT: usize = 10;
pub const DEFAULT_TITLE_CHARS: usize = 80;
pub const DEFAULT_SNIPPET_CHARS: usize = 160;

/// Tunables for duplicate analysis output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateOptions {
    /// Maximum number of groups rendered as previews.
    pub preview_limit: usize,
    /// Characters kept from the first member's title.
    pub title_chars: usize,
    /// Characters kept from each member's content.
    pub snippet_chars: usize,
}

impl Default for DuplicateOptions {
    fn default() -> Self {
        Self {
            preview_limit: DEFAULT_PREVIEW_LIMIT,
            title_chars: DEFAULT_TITLE_CHARS,
            snippet_chars: DEFAULT_SNIPPET_CHARS,
        }
    }
}

/// Two or more records sharing one equivalence key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub key: EquivalenceKey,
    /// Members in input order; the first one is treated as the original.
    pub members: Vec<NoteRecord>,
}

impl DuplicateGroup {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Records in excess of one original.
    pub fn surplus(&self) -> usize {
        self.members.len().saturating_sub(1)
    }
}

/// Display snippet for one member of a previewed group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSnippet {
    pub note_id: NoteId,
    pub snippet: String,
}

/// Display-ready summary of one duplicate group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupPreview {
    /// 1-based position in report order.
    pub index: usize,
    pub title: String,
    pub location_id: Option<i64>,
    pub member_count: usize,
    pub snippets: Vec<MemberSnippet>,
}

/// Result of one duplicate analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DuplicateReport {
    pub total_groups: usize,
    /// Sum over groups of `size - 1`.
    pub total_duplicates: usize,
    pub groups: Vec<DuplicateGroup>,
    /// At most `preview_limit` entries, in the same order as `groups`.
    pub previews: Vec<GroupPreview>,
}

impl DuplicateReport {
    pub fn has_duplicates(&self) -> bool {
        self.total_groups > 0
    }
}

/// Finds duplicate groups using default preview options.
pub fn find_duplicates_default(records: &[NoteRecord]) -> DuplicateReport {
    find_duplicates(records, &DuplicateOptions::default())
}

/// Groups `records` by equivalence key and summarizes groups of size >= 2.
pub fn find_duplicates(records: &[NoteRecord], options: &DuplicateOptions) -> DuplicateReport {
    let groups: Vec<DuplicateGroup> = bucket_by_key(records)
        .into_iter()
        .filter(|group| group.len() >= 2)
        .collect();

    let total_groups = groups.len();
    let total_duplicates = groups.iter().map(DuplicateGroup::surplus).sum();
    let previews = groups
        .iter()
        .take(options.preview_limit)
        .enumerate()
        .map(|(position, group)| build_preview(position + 1, group, options))
        .collect();

    DuplicateReport {
        total_groups,
        total_duplicates,
        groups,
        previews,
    }
}

// HashMap iteration order is unspecified, so key order lives in the Vec and
// the map only points into it.
fn bucket_by_key(records: &[NoteRecord]) -> Vec<DuplicateGroup> {
    let mut slots: HashMap<EquivalenceKey, usize> = HashMap::new();
    let mut buckets: Vec<DuplicateGroup> = Vec::new();

    for record in records {
        let key = record.equivalence_key();
        match slots.get(&key) {
            Some(&slot) => buckets[slot].members.push(record.clone()),
            None => {
                slots.insert(key.clone(), buckets.len());
                buckets.push(DuplicateGroup {
                    key,
                    members: vec![record.clone()],
                });
            }
        }
    }

    buckets
}

fn build_preview(index: usize, group: &DuplicateGroup, options: &DuplicateOptions) -> GroupPreview {
    let title = group
        .members
        .first()
        .map(|first| truncate_chars(&first.normalized_title(), options.title_chars))
        .unwrap_or_default();

    let snippets = group
        .members
        .iter()
        .map(|member| MemberSnippet {
            note_id: member.id,
            snippet: flatten_line_breaks(&truncate_chars(
                &member.normalized_content(),
                options.snippet_chars,
            )),
        })
        .collect();

    GroupPreview {
        index,
        title,
        location_id: group.key.location_id,
        member_count: group.len(),
        snippets,
    }
}
