//! Zip extraction into a working directory.

use super::{ArchiveResult, ExtractionError, DATABASE_FILE_NAME, WORKDIR_PREFIX};
use log::{error, info};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::TempDir;
use zip::ZipArchive;

/// Location of an extracted archive on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArchive {
    /// Directory the archive was extracted into.
    pub root: PathBuf,
    /// Path of the embedded user database.
    pub database_path: PathBuf,
    /// Number of entries the archive declared.
    pub entry_count: usize,
}

/// Extracts every entry of `archive_path` into `dest_dir`.
///
/// # Errors
/// - `NotFound` when the archive path does not exist.
/// - `InvalidArchive` when the file is not a readable zip container.
/// - `MissingDatabase` when no `userData.db` was extracted.
pub fn extract_archive(
    archive_path: impl AsRef<Path>,
    dest_dir: impl AsRef<Path>,
) -> ArchiveResult<ExtractedArchive> {
    let archive_path = archive_path.as_ref();
    let dest_dir = dest_dir.as_ref();
    let started_at = Instant::now();
    info!("event=archive_extract module=archive status=start");

    let result = extract_inner(archive_path, dest_dir);
    match &result {
        Ok(extracted) => info!(
            "event=archive_extract module=archive status=ok entries={} duration_ms={}",
            extracted.entry_count,
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=archive_extract module=archive status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

/// Extracts `archive_path` into a fresh `JWLManager_`-prefixed temp directory.
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn extract_to_workdir(
    archive_path: impl AsRef<Path>,
) -> ArchiveResult<(TempDir, ExtractedArchive)> {
    let workdir = tempfile::Builder::new()
        .prefix(WORKDIR_PREFIX)
        .tempdir()
        .map_err(|source| ExtractionError::Io {
            path: std::env::temp_dir(),
            source,
        })?;
    let extracted = extract_archive(archive_path, workdir.path())?;
    Ok((workdir, extracted))
}

fn extract_inner(archive_path: &Path, dest_dir: &Path) -> ArchiveResult<ExtractedArchive> {
    if !archive_path.exists() {
        return Err(ExtractionError::NotFound(archive_path.to_path_buf()));
    }

    let file = File::open(archive_path).map_err(|source| ExtractionError::Io {
        path: archive_path.to_path_buf(),
        source,
    })?;
    let invalid = |source| ExtractionError::InvalidArchive {
        path: archive_path.to_path_buf(),
        source,
    };
    let mut archive = ZipArchive::new(file).map_err(invalid)?;
    let entry_count = archive.len();

    std::fs::create_dir_all(dest_dir).map_err(|source| ExtractionError::Io {
        path: dest_dir.to_path_buf(),
        source,
    })?;
    archive.extract(dest_dir).map_err(invalid)?;

    let database_path = dest_dir.join(DATABASE_FILE_NAME);
    if !database_path.is_file() {
        return Err(ExtractionError::MissingDatabase {
            root: dest_dir.to_path_buf(),
        });
    }

    Ok(ExtractedArchive {
        root: dest_dir.to_path_buf(),
        database_path,
        entry_count,
    })
}
