//! `jwlscan` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments and resolve which backup database to read.
//! - Wire extraction, schema listing and duplicate analysis from core.
//! - Map failures to descriptive messages and a non-zero exit code.

mod workdir;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use jwlscan_core::{
    default_log_level, extract_to_workdir, init_logging, inspect_schema, open_backup_db,
    render_duplicate_report, render_schema_overview, DuplicateOptions, DuplicateService,
    SqliteNoteSource, DEFAULT_MARKER_COLUMN,
};
use log::info;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tempfile::TempDir;
use workdir::WorkdirError;

#[derive(Parser)]
#[command(
    name = "jwlscan",
    version,
    about = "Inspect note-app backup archives and report duplicate notes"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level: trace, debug, info, warn or error.
    #[arg(long, global = true, env = "JWLSCAN_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true, env = "JWLSCAN_LOG_DIR", value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Extract an archive and list its database tables.
    Inspect {
        /// Path to the `.jwlibrary` archive.
        archive: PathBuf,

        /// Column whose presence marks a table as document-linked.
        #[arg(long, default_value = DEFAULT_MARKER_COLUMN)]
        marker_column: String,

        /// Keep the extracted working directory after exit.
        #[arg(long)]
        keep: bool,
    },

    /// Report notes that share title, content and location.
    Duplicates(DuplicatesArgs),
}

#[derive(Args)]
struct DuplicatesArgs {
    /// Path to the `.jwlibrary` archive.
    #[arg(required_unless_present_any = ["db", "latest_workdir"])]
    archive: Option<PathBuf>,

    /// Read an already extracted database instead of an archive.
    #[arg(long, value_name = "PATH", conflicts_with_all = ["archive", "latest_workdir"])]
    db: Option<PathBuf>,

    /// Reuse the newest extracted working directory in the temp dir.
    #[arg(long, conflicts_with = "archive")]
    latest_workdir: bool,

    /// Maximum number of groups to preview.
    #[arg(long, default_value_t = 10)]
    limit: usize,

    /// Characters shown from each group title.
    #[arg(long, default_value_t = 80)]
    title_chars: usize,

    /// Characters shown from each note body.
    #[arg(long, default_value_t = 160)]
    snippet_chars: usize,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Keep the extracted working directory after exit.
    #[arg(long)]
    keep: bool,
}

impl DuplicatesArgs {
    fn options(&self) -> DuplicateOptions {
        DuplicateOptions {
            preview_limit: self.limit,
            title_chars: self.title_chars,
            snippet_chars: self.snippet_chars,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("✗ Error: {err:#}");
            match err.downcast_ref::<WorkdirError>() {
                Some(workdir_err) => ExitCode::from(workdir_err.exit_code()),
                None => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    match cli.command {
        Command::Inspect {
            archive,
            marker_column,
            keep,
        } => run_inspect(&archive, &marker_column, keep),
        Command::Duplicates(args) => run_duplicates(&args),
    }
}

fn run_inspect(archive: &Path, marker_column: &str, keep: bool) -> Result<()> {
    let (workdir, database) = extract(archive)?;
    let conn = open_backup_db(&database)?;
    let overview = inspect_schema(&conn)?;

    let mut out = io::stdout().lock();
    render_schema_overview(&overview, marker_column, &mut out)?;
    writeln!(out, "\n{}", "=".repeat(80))?;
    writeln!(out, "✓ Database inspection complete!")?;
    writeln!(out, "{}", "=".repeat(80))?;

    drop(conn);
    finish_workdir(workdir, keep);
    Ok(())
}

fn run_duplicates(args: &DuplicatesArgs) -> Result<()> {
    let (workdir, database) = match (&args.archive, &args.db) {
        (Some(archive), _) => {
            let (workdir, database) = extract(archive)?;
            (Some(workdir), database)
        }
        (None, Some(db)) => (None, db.clone()),
        (None, None) if args.latest_workdir => (None, discover_database()?),
        (None, None) => bail!("provide an archive, --db or --latest-workdir"),
    };

    let conn = open_backup_db(&database)?;
    let source = SqliteNoteSource::try_new(&conn)?;
    let report = DuplicateService::new(source, args.options()).analyze()?;

    let mut out = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        render_duplicate_report(&report, &mut out)?;
    }

    drop(conn);
    if let Some(workdir) = workdir {
        finish_workdir(workdir, args.keep);
    }
    Ok(())
}

fn extract(archive: &Path) -> Result<(TempDir, PathBuf)> {
    if !archive.exists() {
        bail!("file `{}` not found", archive.display());
    }
    eprintln!("Extracting {}...", archive.display());
    let (workdir, extracted) = extract_to_workdir(archive)?;
    eprintln!("Extracted to: {}\n", extracted.root.display());
    Ok((workdir, extracted.database_path))
}

fn discover_database() -> Result<PathBuf> {
    let temp_root = std::env::temp_dir();
    let database = workdir::latest_workdir_database(&temp_root)?;
    if let Some(dir) = database.parent() {
        eprintln!("Using temp dir: {}", dir.display());
    }
    Ok(database)
}

fn finish_workdir(workdir: TempDir, keep: bool) {
    if keep {
        let kept = workdir.keep();
        info!("event=workdir_keep module=cli status=ok path={}", kept.display());
        eprintln!("Kept working directory: {}", kept.display());
    }
}
