//! Console rendering of schema listings and duplicate reports.
//!
//! # Responsibility
//! - Turn core results into human-readable console text.
//! - Render per-table failures in place instead of dropping them.
//!
//! # Invariants
//! - Renderers only write; they never recompute analysis results.

use crate::dedup::grouper::DuplicateReport;
use crate::schema::SchemaOverview;
use std::io::{self, Write};

const BANNER_WIDTH: usize = 80;

fn banner(out: &mut impl Write, heading: &str) -> io::Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "{heading}")?;
    writeln!(out, "{rule}")
}

/// Writes the table listing, `marker_column` tables and `Location` details.
pub fn render_schema_overview(
    overview: &SchemaOverview,
    marker_column: &str,
    out: &mut impl Write,
) -> io::Result<()> {
    banner(out, "ALL AVAILABLE TABLES:")?;
    for (position, table) in overview.tables.iter().enumerate() {
        writeln!(out, "{:2}. {table}", position + 1)?;
    }

    writeln!(out)?;
    banner(out, &format!("TABLES WITH '{marker_column}' COLUMN:"))?;
    for outcome in &overview.outcomes {
        match &outcome.columns {
            Ok(columns) if outcome.has_column(marker_column) => {
                let names: Vec<&str> = columns.iter().map(|column| column.name.as_str()).collect();
                writeln!(out, "\n✓ {}", outcome.table)?;
                writeln!(out, "  Columns: {}", names.join(", "))?;
            }
            Ok(_) => {}
            Err(err) => writeln!(out, "\n✗ Error checking {}: {err}", outcome.table)?,
        }
    }
    if overview.tables_with_column(marker_column).next().is_none() {
        writeln!(out, "⚠ No tables with '{marker_column}' column found!")?;
    }

    writeln!(out)?;
    banner(out, "LOCATION TABLE DETAILS:")?;
    match &overview.location {
        Ok(details) => {
            writeln!(out, "\nColumns in Location table:")?;
            for column in &details.columns {
                writeln!(out, "  - {} ({})", column.name, column.decl_type)?;
            }
            writeln!(
                out,
                "\nRows with non-NULL DocumentId: {}",
                details.rows_with_document
            )?;
        }
        Err(err) => writeln!(out, "Error: {err}")?,
    }

    Ok(())
}

/// Writes the one-line summary followed by the bounded group previews.
///
/// Layout per group: `Group <i>: Title='<title>' Location=<id|None> Count=<n>`
/// then one `  - <note id> <snippet>` line per member.
pub fn render_duplicate_report(report: &DuplicateReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "Found {} duplicate groups with {} duplicates",
        report.total_groups, report.total_duplicates
    )?;

    for preview in &report.previews {
        let location = preview
            .location_id
            .map_or_else(|| "None".to_string(), |id| id.to_string());
        writeln!(
            out,
            "Group {}: Title='{}' Location={location} Count={}",
            preview.index, preview.title, preview.member_count
        )?;
        for member in &preview.snippets {
            writeln!(out, "  - {} {}", member.note_id, member.snippet)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{render_duplicate_report, render_schema_overview};
    use crate::dedup::grouper::{find_duplicates, find_duplicates_default, DuplicateOptions};
    use crate::model::note::NoteRecord;
    use crate::schema::{ColumnInfo, LocationDetails, SchemaError, SchemaOverview, TableOutcome};

    fn column(name: &str, decl_type: &str) -> ColumnInfo {
        ColumnInfo {
            position: 0,
            name: name.to_string(),
            decl_type: decl_type.to_string(),
            not_null: false,
            primary_key: false,
        }
    }

    fn render_report(records: &[NoteRecord], options: &DuplicateOptions) -> String {
        let report = find_duplicates(records, options);
        let mut out = Vec::new();
        render_duplicate_report(&report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_report_prints_only_the_summary() {
        let mut out = Vec::new();
        render_duplicate_report(&find_duplicates_default(&[]), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Found 0 duplicate groups with 0 duplicates\n");
    }

    #[test]
    fn report_lists_capped_previews_in_group_line_layout() {
        let records = vec![
            NoteRecord::new(1, Some("First"), Some("a\nb"), Some(3)),
            NoteRecord::new(2, Some("First"), Some("a\nb"), Some(3)),
            NoteRecord::new(3, Some("Second"), Some("c"), None),
            NoteRecord::new(4, Some("Second"), Some("c"), None),
        ];
        let options = DuplicateOptions {
            preview_limit: 1,
            ..DuplicateOptions::default()
        };
        let text = render_report(&records, &options);
        assert_eq!(
            text,
            "Found 2 duplicate groups with 2 duplicates\n\
             Group 1: Title='First' Location=3 Count=2\n\
             \x20 - 1 a b\n\
             \x20 - 2 a b\n"
        );
    }

    #[test]
    fn absent_location_renders_as_none() {
        let records = vec![
            NoteRecord::new(7, None::<String>, Some("body"), None),
            NoteRecord::new(8, Some(""), Some("body"), None),
        ];
        let text = render_report(&records, &DuplicateOptions::default());
        assert!(text.contains("Group 1: Title='' Location=None Count=2"));
        assert!(text.contains("  - 8 body"));
    }

    #[test]
    fn schema_overview_renders_failures_in_place() {
        let overview = SchemaOverview {
            tables: vec!["Broken".to_string(), "Location".to_string(), "Tag".to_string()],
            outcomes: vec![
                TableOutcome {
                    table: "Broken".to_string(),
                    columns: Err(SchemaError::UnknownTable("Broken".to_string())),
                },
                TableOutcome {
                    table: "Location".to_string(),
                    columns: Ok(vec![column("LocationId", "INTEGER"), column("DocumentId", "INTEGER")]),
                },
                TableOutcome {
                    table: "Tag".to_string(),
                    columns: Ok(vec![column("TagId", "INTEGER")]),
                },
            ],
            location: Ok(LocationDetails {
                columns: vec![column("LocationId", "INTEGER"), column("DocumentId", "INTEGER")],
                rows_with_document: 4,
            }),
        };

        let mut out = Vec::new();
        render_schema_overview(&overview, "DocumentId", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(" 1. Broken"));
        assert!(text.contains(" 3. Tag"));
        assert!(text.contains("✗ Error checking Broken"));
        assert!(text.contains("✓ Location\n  Columns: LocationId, DocumentId"));
        assert!(!text.contains("✓ Tag"));
        assert!(text.contains("  - DocumentId (INTEGER)"));
        assert!(text.contains("Rows with non-NULL DocumentId: 4"));
    }

    #[test]
    fn schema_overview_warns_when_no_table_has_marker() {
        let overview = SchemaOverview {
            tables: vec!["Tag".to_string()],
            outcomes: vec![TableOutcome {
                table: "Tag".to_string(),
                columns: Ok(vec![column("TagId", "INTEGER")]),
            }],
            location: Err(SchemaError::UnknownTable("Location".to_string())),
        };

        let mut out = Vec::new();
        render_schema_overview(&overview, "DocumentId", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("✓ Tag"));
        assert!(text.contains("⚠ No tables with 'DocumentId' column found!"));
        assert!(text.contains("Error: "));
    }
}
