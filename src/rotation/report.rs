// src/rotation/report.rs
//! Per-table and combined summaries of one migration run

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::outcome::{OutcomeTally, RowFailure, RowOutcome};
use crate::db::TableSpec;

#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
    pub table: String,
    pub column: String,
    pub tally: OutcomeTally,
    /// Migrated rows per legacy key label
    pub migrated_from: BTreeMap<String, usize>,
    pub failures: Vec<RowFailure>,
    /// Set when the table could not be read at all
    pub unreadable: Option<String>,
}

impl TableReport {
    pub fn new(spec: &TableSpec) -> Self {
        Self {
            table: spec.table().to_string(),
            column: spec.column().to_string(),
            tally: OutcomeTally::default(),
            migrated_from: BTreeMap::new(),
            failures: Vec::new(),
            unreadable: None,
        }
    }

    pub fn unreadable(spec: &TableSpec, cause: impl fmt::Display) -> Self {
        Self {
            unreadable: Some(cause.to_string()),
            ..Self::new(spec)
        }
    }

    pub fn record(&mut self, id: i64, outcome: &RowOutcome) {
        self.tally.record(outcome);
        match outcome {
            RowOutcome::Migrated { from, .. } => {
                *self.migrated_from.entry(from.clone()).or_default() += 1;
            }
            RowOutcome::Failed(err) => self.failures.push(RowFailure {
                id,
                cause: err.to_string(),
            }),
            RowOutcome::AlreadyCurrent | RowOutcome::Empty => {}
        }
    }

    pub fn failed_ids(&self) -> Vec<i64> {
        self.failures.iter().map(|f| f.id).collect()
    }
}

impl fmt::Display for TableReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.unreadable {
            Some(cause) => write!(f, "{}.{}: UNREADABLE ({cause})", self.table, self.column),
            None => write!(f, "{}.{}: {}", self.table, self.column, self.tally),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub tables: Vec<TableReport>,
}

impl MigrationReport {
    /// Combined tally across every table
    pub fn totals(&self) -> OutcomeTally {
        let mut total = OutcomeTally::default();
        for table in &self.tables {
            total += table.tally;
        }
        total
    }

    pub fn table(&self, name: &str) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.table == name)
    }

    /// Any failed row or unreadable table
    pub fn needs_follow_up(&self) -> bool {
        self.tables
            .iter()
            .any(|t| t.tally.failed > 0 || t.unreadable.is_some())
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.dry_run { " (DRY RUN)" } else { "" };
        writeln!(f, "=== MIGRATION SUMMARY{mode} ===")?;
        for table in &self.tables {
            writeln!(f, "{table}")?;
            for failure in &table.failures {
                writeln!(f, "  failed id={}: {}", failure.id, failure.cause)?;
            }
        }
        write!(f, "TOTAL: {}", self.totals())
    }
}
