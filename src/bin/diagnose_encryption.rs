// src/bin/diagnose_encryption.rs
//! Report which configured key opens a sample of rows — read-only

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use field_rekey::config;
use field_rekey::db::{open_app_db_read_only, select_tables};
use field_rekey::diagnose::{describe_keys, report_samples};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "diagnose-encryption", version)]
#[command(about = "Show which configured key decrypts the first rows of each table")]
struct Args {
    /// Config file (TOML); defaults to $REKEY_CONFIG, then ./rekey.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// SQLite database; overrides the config file and $REKEY_DATABASE
    #[arg(long)]
    database: Option<PathBuf>,

    /// Only inspect this table (repeatable)
    #[arg(long = "table")]
    tables: Vec<String>,

    /// Rows per table (default from config, 5)
    #[arg(long)]
    sample: Option<usize>,

    /// Print full derived keys in hex — troubleshooting only
    #[arg(long)]
    show_keys: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let config = config::load(args.config.as_deref())?;
    let keys = config.keyring()?;
    let tables = select_tables(&config.table_specs()?, &args.tables)?;
    let db_path = match args.database {
        Some(path) => path,
        None => config.database_path()?.to_path_buf(),
    };
    let sample_size = args.sample.unwrap_or(config.run.sample_size);

    println!("=== CONFIGURED KEYS ===");
    for description in describe_keys(&keys, args.show_keys) {
        println!("{description}");
    }
    if keys.legacy().is_empty() {
        println!("(no legacy keys configured — a migration would refuse to start)");
    }

    let conn = open_app_db_read_only(&db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;

    println!("\n=== SAMPLE ({sample_size} row(s) per table) ===");
    for sample in report_samples(&conn, &tables, &keys, sample_size) {
        println!("{sample}");
    }

    Ok(())
}
