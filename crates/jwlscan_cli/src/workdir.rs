//! Discovery of previously extracted working directories.
//!
//! Only the most recently modified `JWLManager_*` directory is considered. If
//! it lacks a `userData.db` that is an error; older directories are never
//! used as a fallback. Only the CLI scans the temp dir; core receives a
//! resolved database path.

use jwlscan_core::{DATABASE_FILE_NAME, WORKDIR_PREFIX};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkdirError {
    #[error("no JWLManager_* temp directories found in `{}`", .0.display())]
    NoWorkdir(PathBuf),

    #[error("no userData.db in `{}`", .0.display())]
    MissingDatabase(PathBuf),

    #[error("failed to scan `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WorkdirError {
    /// Process exit code reported for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NoWorkdir(_) => 2,
            Self::MissingDatabase(_) => 3,
            Self::Io { .. } => 1,
        }
    }
}

/// Returns the newest `JWLManager_*` directory under `temp_root`.
pub fn latest_workdir(temp_root: &Path) -> Result<PathBuf, WorkdirError> {
    let io_error = |source| WorkdirError::Io {
        path: temp_root.to_path_buf(),
        source,
    };
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry in std::fs::read_dir(temp_root).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        if !entry.file_name().to_string_lossy().starts_with(WORKDIR_PREFIX) {
            continue;
        }
        let metadata = entry.metadata().map_err(io_error)?;
        if !metadata.is_dir() {
            continue;
        }

        let modified = metadata.modified().map_err(io_error)?;
        let is_newer = newest
            .as_ref()
            .map_or(true, |(current, _)| modified > *current);
        if is_newer {
            newest = Some((modified, entry.path()));
        }
    }

    newest
        .map(|(_, dir)| dir)
        .ok_or_else(|| WorkdirError::NoWorkdir(temp_root.to_path_buf()))
}

/// Returns the database path inside the newest working directory.
pub fn latest_workdir_database(temp_root: &Path) -> Result<PathBuf, WorkdirError> {
    let workdir = latest_workdir(temp_root)?;
    let database = workdir.join(DATABASE_FILE_NAME);
    if !database.is_file() {
        return Err(WorkdirError::MissingDatabase(workdir));
    }
    Ok(database)
}
