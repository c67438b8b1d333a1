//! Fixture builders for backup databases and archives.

#![allow(dead_code)]

use rusqlite::{params, Connection};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const BACKUP_SCHEMA: &str = "
CREATE TABLE Location (
    LocationId INTEGER PRIMARY KEY,
    BookNumber INTEGER,
    ChapterNumber INTEGER,
    DocumentId INTEGER,
    KeySymbol TEXT,
    MepsLanguage INTEGER,
    Type INTEGER NOT NULL,
    Title TEXT
);
CREATE TABLE Note (
    NoteId INTEGER PRIMARY KEY,
    Guid TEXT NOT NULL,
    UserMarkId INTEGER,
    LocationId INTEGER,
    Title TEXT,
    Content TEXT,
    LastModified TEXT,
    BlockType INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE Bookmark (
    BookmarkId INTEGER PRIMARY KEY,
    LocationId INTEGER NOT NULL,
    PublicationLocationId INTEGER NOT NULL,
    Slot INTEGER NOT NULL,
    Title TEXT NOT NULL
);
CREATE TABLE InputField (
    LocationId INTEGER NOT NULL,
    TextTag TEXT NOT NULL,
    Value TEXT NOT NULL
);
CREATE TABLE Tag (
    TagId INTEGER PRIMARY KEY,
    Type INTEGER NOT NULL,
    Name TEXT NOT NULL
);
";

/// Raw note row: `(NoteId, Title, Content, LocationId)`.
pub type NoteRow<'a> = (i64, Option<&'a str>, Option<&'a str>, Option<i64>);

/// Creates a backup-shaped database at `path` holding `notes`.
pub fn build_backup_db(path: &Path, notes: &[NoteRow<'_>]) -> Connection {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(BACKUP_SCHEMA).unwrap();
    conn.execute_batch(
        "INSERT INTO Location (LocationId, BookNumber, ChapterNumber, DocumentId, Type)
         VALUES (1, 19, 23, NULL, 0), (2, NULL, NULL, 1102021811, 0), (3, NULL, NULL, 1102021812, 0);",
    )
    .unwrap();
    for (id, title, content, location_id) in notes {
        conn.execute(
            "INSERT INTO Note (NoteId, Guid, LocationId, Title, Content)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![id, format!("guid-{id}"), location_id, title, content],
        )
        .unwrap();
    }
    conn
}

/// Writes a zip archive at `archive_path` with the given `(name, bytes)` entries.
pub fn build_archive(archive_path: &Path, entries: &[(&str, Vec<u8>)]) {
    let file = File::create(archive_path).unwrap();
    let mut writer = ZipWriter::new(file);
    for (name, bytes) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap();
}

/// Builds a complete backup archive holding a database with `notes`.
pub fn build_backup_archive(dir: &Path, notes: &[NoteRow<'_>]) -> PathBuf {
    let db_path = dir.join("source.db");
    drop(build_backup_db(&db_path, notes));
    let db_bytes = std::fs::read(&db_path).unwrap();

    let archive_path = dir.join("backup.jwlibrary");
    build_archive(
        &archive_path,
        &[
            ("manifest.json", br#"{"name":"fixture","version":1}"#.to_vec()),
            ("userData.db", db_bytes),
        ],
    );
    archive_path
}
