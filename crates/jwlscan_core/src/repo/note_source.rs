//! Note record source backed by the `Note` table of a backup database.
//!
//! # Invariants
//! - Rows whose title and content are both null/empty are filtered in SQL.
//! - Rows are returned in `NoteId` order so analysis output is reproducible.

use crate::db::{StorageError, StorageResult};
use crate::model::note::NoteRecord;
use crate::schema::{table_exists, table_has_column};
use rusqlite::Connection;

const NOTE_TABLE: &str = "Note";
const NOTE_COLUMNS: [&str; 4] = ["NoteId", "Title", "Content", "LocationId"];

const CANDIDATE_NOTES_SQL: &str = "SELECT
    NoteId,
    Title,
    Content,
    LocationId
FROM Note
WHERE (Title IS NOT NULL AND Title != '')
   OR (Content IS NOT NULL AND Content != '')
ORDER BY NoteId ASC;";

/// Supplier of note records for duplicate analysis.
pub trait NoteSource {
    /// Loads every note carrying a non-empty title or content.
    fn load_candidate_notes(&self) -> StorageResult<Vec<NoteRecord>>;
}

/// `NoteSource` reading the backup `Note` table.
pub struct SqliteNoteSource<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteSource<'conn> {
    /// Constructs a source after checking the `Note` table layout.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        ensure_note_table_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NoteSource for SqliteNoteSource<'_> {
    fn load_candidate_notes(&self) -> StorageResult<Vec<NoteRecord>> {
        let mut stmt = self.conn.prepare(CANDIDATE_NOTES_SQL)?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(NoteRecord {
                id: row.get("NoteId")?,
                title: row.get("Title")?,
                content: row.get("Content")?,
                location_id: row.get("LocationId")?,
            });
        }
        Ok(notes)
    }
}

/// In-memory `NoteSource` for callers that already hold the records.
impl NoteSource for Vec<NoteRecord> {
    fn load_candidate_notes(&self) -> StorageResult<Vec<NoteRecord>> {
        Ok(self.iter().filter(|note| note.has_text()).cloned().collect())
    }
}

fn ensure_note_table_ready(conn: &Connection) -> StorageResult<()> {
    if !table_exists(conn, NOTE_TABLE)? {
        return Err(StorageError::MissingRequiredTable(NOTE_TABLE));
    }

    for column in NOTE_COLUMNS {
        if !table_has_column(conn, NOTE_TABLE, column)? {
            return Err(StorageError::MissingRequiredColumn {
                table: NOTE_TABLE,
                column,
            });
        }
    }

    Ok(())
}
