//! Read-only access to the database embedded in a backup archive.
//!
//! # Responsibility
//! - Open the extracted `userData.db` without modifying it.
//! - Define the storage error surfaced by every reader in core.
//!
//! # Invariants
//! - Connections are opened read-only; core never migrates or writes the
//!   backup schema, which belongs to the originating application.

use std::path::PathBuf;
use thiserror::Error;

mod open;

pub use open::open_backup_db;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database not found: {}", .0.display())]
    DatabaseMissing(PathBuf),

    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("backup database has no `{0}` table")]
    MissingRequiredTable(&'static str),

    #[error("backup table `{table}` has no `{column}` column")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}
