//! Core logic for inspecting note-app backup archives.
//! Extraction, schema listing and duplicate-note detection live here; the
//! `jwlscan` binary only wires them together.

pub mod archive;
pub mod db;
pub mod dedup;
pub mod logging;
pub mod model;
pub mod report;
pub mod repo;
pub mod schema;
pub mod service;

pub use archive::{
    extract_archive, extract_to_workdir, ArchiveResult, ExtractedArchive, ExtractionError,
    DATABASE_FILE_NAME, WORKDIR_PREFIX,
};
pub use db::{open_backup_db, StorageError, StorageResult};
pub use dedup::grouper::{
    find_duplicates, find_duplicates_default, DuplicateGroup, DuplicateOptions, DuplicateReport,
    GroupPreview, MemberSnippet,
};
pub use dedup::normalize::normalize_text;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{EquivalenceKey, NoteId, NoteRecord};
pub use report::{render_duplicate_report, render_schema_overview};
pub use repo::note_source::{NoteSource, SqliteNoteSource};
pub use schema::{inspect_schema, SchemaError, SchemaOverview, TableOutcome, DEFAULT_MARKER_COLUMN};
pub use service::duplicate_service::DuplicateService;

