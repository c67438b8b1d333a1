//! Note record and equivalence key.
//!
//! # Responsibility
//! - Replace positional row tuples with named, typed note fields.
//! - Derive the composite key used to decide whether two notes are duplicates.
//!
//! # Invariants
//! - `id` is assigned by the originating store and never changes.
//! - Key equality is exact: no trimming, case folding or whitespace collapsing.
//! - Absent and empty text collapse to the same key component.

use crate::dedup::normalize::normalize_text;
use serde::{Deserialize, Serialize};

/// Identifier assigned to a note by the backup database (`Note.NoteId`).
pub type NoteId = i64;

/// One stored note as read from the backup database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Store-assigned identifier.
    pub id: NoteId,
    /// Note title; the store may keep a missing title as `NULL` or `""`.
    pub title: Option<String>,
    /// Note body; same absent/empty duality as `title`.
    pub content: Option<String>,
    /// Reference to a `Location` row. Never dereferenced here.
    pub location_id: Option<i64>,
}

impl NoteRecord {
    /// Creates a record from raw column values.
    pub fn new(
        id: NoteId,
        title: Option<impl Into<String>>,
        content: Option<impl Into<String>>,
        location_id: Option<i64>,
    ) -> Self {
        Self {
            id,
            title: title.map(Into::into),
            content: content.map(Into::into),
            location_id,
        }
    }

    /// Title with absent collapsed to the empty string.
    pub fn normalized_title(&self) -> String {
        normalize_text(self.title.as_deref())
    }

    /// Content with absent collapsed to the empty string.
    pub fn normalized_content(&self) -> String {
        normalize_text(self.content.as_deref())
    }

    /// Derives the composite key used for duplicate grouping.
    pub fn equivalence_key(&self) -> EquivalenceKey {
        EquivalenceKey {
            title: self.normalized_title(),
            content: self.normalized_content(),
            location_id: self.location_id,
        }
    }

    /// Returns whether title or content carries any text.
    pub fn has_text(&self) -> bool {
        !self.normalized_title().is_empty() || !self.normalized_content().is_empty()
    }
}

/// Composite identity `(title, content, location_id)` shared by duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquivalenceKey {
    pub title: String,
    pub content: String,
    pub location_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::NoteRecord;

    #[test]
    fn absent_and_empty_title_produce_equal_keys() {
        let absent = NoteRecord::new(1, None::<String>, Some("x"), Some(5));
        let empty = NoteRecord::new(2, Some(""), Some("x"), Some(5));
        assert_eq!(absent.equivalence_key(), empty.equivalence_key());
    }

    #[test]
    fn key_keeps_whitespace_and_case() {
        let plain = NoteRecord::new(1, Some("Hello"), Some("body"), None);
        let padded = NoteRecord::new(2, Some("Hello "), Some("body"), None);
        let lower = NoteRecord::new(3, Some("hello"), Some("body"), None);
        assert_ne!(plain.equivalence_key(), padded.equivalence_key());
        assert_ne!(plain.equivalence_key(), lower.equivalence_key());
    }

    #[test]
    fn has_text_requires_title_or_content() {
        assert!(NoteRecord::new(1, Some("t"), None::<String>, None).has_text());
        assert!(NoteRecord::new(2, None::<String>, Some("c"), None).has_text());
        assert!(!NoteRecord::new(3, Some(""), None::<String>, Some(1)).has_text());
    }
}
