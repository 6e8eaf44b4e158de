// src/bin/migrate_encryption.rs
//! Re-encrypt every legacy-key field under the current key
//!
//! Safe to re-run: rows already on the current key are skipped.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use field_rekey::config;
use field_rekey::db::{open_app_db, select_tables};
use field_rekey::{export_report_json, MigrationRunner};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "migrate-encryption", version)]
#[command(about = "Re-encrypt legacy-key fields under the current encryption key")]
struct Args {
    /// Config file (TOML); defaults to $REKEY_CONFIG, then ./rekey.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// SQLite database; overrides the config file and $REKEY_DATABASE
    #[arg(long)]
    database: Option<PathBuf>,

    /// Only migrate this table (repeatable)
    #[arg(long = "table")]
    tables: Vec<String>,

    /// Classify every row but write nothing
    #[arg(long)]
    dry_run: bool,

    /// Also write the final report as JSON
    #[arg(long)]
    report_json: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Every precondition is checked before the database is opened
    let config = config::load(args.config.as_deref())?;
    let keys = config.keyring()?;
    keys.require_legacy()?;
    let tables = select_tables(&config.table_specs()?, &args.tables)?;
    let db_path = match args.database {
        Some(path) => path,
        None => config.database_path()?.to_path_buf(),
    };

    info!("Field re-key migration");
    info!(
        "current key fingerprint {} | {} legacy key(s) | {} table(s){}",
        keys.current().key().fingerprint(),
        keys.legacy().len(),
        tables.len(),
        if args.dry_run { " | DRY RUN" } else { "" }
    );

    let conn = open_app_db(&db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;

    let report = MigrationRunner::new(&conn, &keys)?
        .dry_run(args.dry_run)
        .run(&tables);

    println!("\n{report}");

    if let Some(path) = &args.report_json {
        export_report_json(&report, path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!("Report written to {}", path.display());
    }

    if report.needs_follow_up() {
        warn!("Some rows could not be migrated — recover their keys and re-run");
    }

    Ok(())
}
