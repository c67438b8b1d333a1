//! Backup archive extraction.
//!
//! # Responsibility
//! - Open `.jwlibrary` zip containers and materialize them on disk.
//! - Locate the embedded user database inside the extracted tree.
//!
//! # Invariants
//! - Entries that would escape the destination directory are never written.
//! - A successful extraction always yields an existing `userData.db`.

use std::path::PathBuf;
use thiserror::Error;

mod extract;

pub use extract::{extract_archive, extract_to_workdir, ExtractedArchive};

/// File name of the SQLite database inside a backup archive.
pub const DATABASE_FILE_NAME: &str = "userData.db";
/// Prefix of working directories created for extracted archives.
pub const WORKDIR_PREFIX: &str = "JWLManager_";

pub type ArchiveResult<T> = Result<T, ExtractionError>;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("archive not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to access `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{}` is not a valid backup archive: {source}", path.display())]
    InvalidArchive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("archive extracted to `{}` does not contain userData.db", root.display())]
    MissingDatabase { root: PathBuf },
}
