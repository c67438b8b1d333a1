//! Connection bootstrap for extracted backup databases.
//!
//! # Invariants
//! - Returned connections are read-only.
//! - A missing file is reported as `DatabaseMissing`, never created.

use super::{StorageError, StorageResult};
use log::{error, info};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens the backup database at `path` in read-only mode.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_backup_db(path: impl AsRef<Path>) -> StorageResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=read_only");

    if !path.is_file() {
        error!(
            "event=db_open module=db status=error mode=read_only error_code=db_missing path={}",
            path.display()
        );
        return Err(StorageError::DatabaseMissing(path.to_path_buf()));
    }

    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = match Connection::open_with_flags(path, flags) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=read_only duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode=read_only duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=read_only duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

// SQLite opens lazily; reading the schema surfaces "not a database" here
// instead of on the first real query.
fn bootstrap_connection(conn: &Connection) -> StorageResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    conn.query_row("SELECT COUNT(*) FROM sqlite_master;", [], |row| {
        row.get::<_, i64>(0)
    })?;
    Ok(())
}
