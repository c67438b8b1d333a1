//! Duplicate analysis use-case.
//!
//! # Responsibility
//! - Load candidate notes from an injected `NoteSource` and group them.
//! - Emit `duplicate_scan` diagnostics with counts and duration.
//!
//! # Invariants
//! - Each `analyze` call owns its grouping state; nothing is shared between calls.

use crate::db::StorageResult;
use crate::dedup::grouper::{find_duplicates, DuplicateOptions, DuplicateReport};
use crate::repo::note_source::NoteSource;
use log::{error, info};
use std::time::Instant;

/// Duplicate analysis facade over a note source.
pub struct DuplicateService<S: NoteSource> {
    source: S,
    options: DuplicateOptions,
}

impl<S: NoteSource> DuplicateService<S> {
    pub fn new(source: S, options: DuplicateOptions) -> Self {
        Self { source, options }
    }

    /// Loads notes and reports duplicate groups.
    ///
    /// # Errors
    /// - Propagates `StorageError` from the note source.
    pub fn analyze(&self) -> StorageResult<DuplicateReport> {
        let started_at = Instant::now();
        info!("event=duplicate_scan module=service status=start");

        let records = match self.source.load_candidate_notes() {
            Ok(records) => records,
            Err(err) => {
                error!(
                    "event=duplicate_scan module=service status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err);
            }
        };

        let report = find_duplicates(&records, &self.options);
        info!(
            "event=duplicate_scan module=service status=ok notes={} groups={} duplicates={} duration_ms={}",
            records.len(),
            report.total_groups,
            report.total_duplicates,
            started_at.elapsed().as_millis()
        );
        Ok(report)
    }
}
