//! Schema introspection for backup databases.
//!
//! # Responsibility
//! - List tables and per-table column metadata.
//! - Collect one outcome per table so a failing table never hides the rest.
//! - Summarize the `Location` table and its document references.
//!
//! # Invariants
//! - Introspection is read-only.
//! - Table names are always quoted before being spliced into PRAGMA text.

use crate::db::StorageResult;
use log::{info, warn};
use rusqlite::Connection;
use serde::Serialize;
use thiserror::Error;

/// Column used to flag tables that reference publications.
pub const DEFAULT_MARKER_COLUMN: &str = "DocumentId";
const LOCATION_TABLE: &str = "Location";

/// Per-table introspection failure.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("table `{0}` does not exist or has no columns")]
    UnknownTable(String),

    #[error("failed to inspect table `{table}`: {source}")]
    Sqlite {
        table: String,
        #[source]
        source: rusqlite::Error,
    },
}

/// One row of `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub position: i64,
    pub name: String,
    /// Declared SQL type; empty when the column was declared untyped.
    pub decl_type: String,
    pub not_null: bool,
    pub primary_key: bool,
}

/// Introspection result for one table.
#[derive(Debug)]
pub struct TableOutcome {
    pub table: String,
    pub columns: Result<Vec<ColumnInfo>, SchemaError>,
}

impl TableOutcome {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns
            .as_ref()
            .map(|columns| columns.iter().any(|column| column.name == name))
            .unwrap_or(false)
    }
}

/// Column layout of `Location` and how many rows point at a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationDetails {
    pub columns: Vec<ColumnInfo>,
    pub rows_with_document: i64,
}

/// Full schema listing of one backup database.
#[derive(Debug)]
pub struct SchemaOverview {
    /// Table names sorted by name.
    pub tables: Vec<String>,
    /// One entry per table, in `tables` order.
    pub outcomes: Vec<TableOutcome>,
    pub location: Result<LocationDetails, SchemaError>,
}

impl SchemaOverview {
    /// Tables whose column list contains `column`, in listing order.
    pub fn tables_with_column<'a>(
        &'a self,
        column: &'a str,
    ) -> impl Iterator<Item = &'a TableOutcome> + 'a {
        self.outcomes
            .iter()
            .filter(move |outcome| outcome.has_column(column))
    }

    /// Tables whose introspection failed.
    pub fn failed_tables(&self) -> impl Iterator<Item = (&str, &SchemaError)> {
        self.outcomes.iter().filter_map(|outcome| {
            outcome
                .columns
                .as_ref()
                .err()
                .map(|err| (outcome.table.as_str(), err))
        })
    }
}

/// Lists user tables sorted by name.
pub fn list_tables(conn: &Connection) -> StorageResult<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name;")?;
    let mut rows = stmt.query([])?;
    let mut tables = Vec::new();
    while let Some(row) = rows.next()? {
        tables.push(row.get(0)?);
    }
    Ok(tables)
}

/// Reads column metadata for `table`.
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<ColumnInfo>, SchemaError> {
    let wrap = |source| SchemaError::Sqlite {
        table: table.to_string(),
        source,
    };
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({});", quote_identifier(table)))
        .map_err(wrap)?;
    let mut rows = stmt.query([]).map_err(wrap)?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next().map_err(wrap)? {
        columns.push(read_column(row).map_err(wrap)?);
    }

    if columns.is_empty() {
        return Err(SchemaError::UnknownTable(table.to_string()));
    }
    Ok(columns)
}

/// Inspects the given tables, keeping one outcome per table.
pub fn inspect_tables(conn: &Connection, tables: &[String]) -> Vec<TableOutcome> {
    tables
        .iter()
        .map(|table| {
            let columns = table_columns(conn, table);
            if let Err(err) = &columns {
                warn!("event=schema_table module=schema status=error table={table} error={err}");
            }
            TableOutcome {
                table: table.clone(),
                columns,
            }
        })
        .collect()
}

/// Lists every table with its columns plus `Location` details.
pub fn inspect_schema(conn: &Connection) -> StorageResult<SchemaOverview> {
    let tables = list_tables(conn)?;
    let outcomes = inspect_tables(conn, &tables);
    let overview = SchemaOverview {
        tables,
        outcomes,
        location: location_details(conn),
    };
    info!(
        "event=schema_inspect module=schema status=ok tables={} failed={}",
        overview.tables.len(),
        overview.failed_tables().count()
    );
    Ok(overview)
}

/// Columns of `Location` and the number of rows with a non-null `DocumentId`.
pub fn location_details(conn: &Connection) -> Result<LocationDetails, SchemaError> {
    let columns = table_columns(conn, LOCATION_TABLE)?;
    let rows_with_document = conn
        .query_row(
            &format!(
                "SELECT COUNT(*) FROM {} WHERE {} IS NOT NULL;",
                quote_identifier(LOCATION_TABLE),
                quote_identifier(DEFAULT_MARKER_COLUMN)
            ),
            [],
            |row| row.get(0),
        )
        .map_err(|source| SchemaError::Sqlite {
            table: LOCATION_TABLE.to_string(),
            source,
        })?;
    Ok(LocationDetails {
        columns,
        rows_with_document,
    })
}

/// Returns whether a table named `table` exists.
pub fn table_exists(conn: &Connection, table: &str) -> StorageResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Returns whether `table` declares `column`.
pub fn table_has_column(conn: &Connection, table: &str, column: &str) -> StorageResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({});", quote_identifier(table)))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn read_column(row: &rusqlite::Row<'_>) -> rusqlite::Result<ColumnInfo> {
    Ok(ColumnInfo {
        position: row.get("cid")?,
        name: row.get("name")?,
        decl_type: row.get("type")?,
        not_null: row.get::<_, i64>("notnull")? != 0,
        primary_key: row.get::<_, i64>("pk")? != 0,
    })
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
