// src/rotation/runner.rs
//! Re-encrypt every row of an encrypted column under the current key
//!
//! One runner, parameterised by `TableSpec`, applied to each table in turn.
//! Rows are independent units of read → decrypt → encrypt → write; there is no
//! cross-row transaction. Re-running is safe: rows that already open under the
//! current key are skipped.

use chrono::Utc;
use rusqlite::Connection;
use tracing::{debug, info, warn};

use super::outcome::RowOutcome;
use super::report::{MigrationReport, TableReport};
use crate::crypto::{
    decrypt_envelope, decrypt_field, encrypt_field, resolve_envelope, Envelope, KeyRing,
};
use crate::db::{read_rows, update_field, FieldRow, StoredValue, TableSpec};
use crate::error::{ConfigError, RowError};

pub struct MigrationRunner<'a> {
    conn: &'a Connection,
    keys: &'a KeyRing,
    dry_run: bool,
}

impl<'a> MigrationRunner<'a> {
    /// Fails only when no legacy key is configured — nothing is read before this check
    pub fn new(conn: &'a Connection, keys: &'a KeyRing) -> Result<Self, ConfigError> {
        keys.require_legacy()?;
        Ok(Self {
            conn,
            keys,
            dry_run: false,
        })
    }

    /// Classify rows without writing anything back
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run every table; a table that cannot be read is recorded and skipped
    pub fn run(&self, tables: &[TableSpec]) -> MigrationReport {
        let started_at = Utc::now();
        let reports = tables
            .iter()
            .map(|spec| {
                self.run_table(spec).unwrap_or_else(|err| {
                    warn!("{}.{}: cannot read rows: {err}", spec.table(), spec.column());
                    TableReport::unreadable(spec, err)
                })
            })
            .collect();

        let report = MigrationReport {
            dry_run: self.dry_run,
            started_at,
            finished_at: Utc::now(),
            tables: reports,
        };
        info!("all tables done: {}", report.totals());
        report
    }

    pub fn run_table(&self, spec: &TableSpec) -> rusqlite::Result<TableReport> {
        let rows = read_rows(self.conn, spec)?;
        info!(
            "{}.{}: {} row(s){}",
            spec.table(),
            spec.column(),
            rows.len(),
            if self.dry_run { " (dry run)" } else { "" }
        );

        let mut report = TableReport::new(spec);
        for row in &rows {
            let outcome = self.migrate_row(spec, row);
            match &outcome {
                RowOutcome::Failed(_) => warn!("{} id={}: {outcome}", spec.table(), row.id),
                RowOutcome::Migrated { .. } => info!("{} id={}: {outcome}", spec.table(), row.id),
                RowOutcome::AlreadyCurrent | RowOutcome::Empty => {
                    debug!("{} id={}: {outcome}", spec.table(), row.id)
                }
            }
            report.record(row.id, &outcome);
        }

        info!("{report}");
        Ok(report)
    }

    /// Process one row; never panics and never propagates — every error is an outcome
    pub fn migrate_row(&self, spec: &TableSpec, row: &FieldRow) -> RowOutcome {
        let field = match &row.value {
            StoredValue::Undecodable(reason) => {
                return RowOutcome::Failed(RowError::Undecodable(reason.clone()))
            }
            value => match value.as_text() {
                Some(field) => field,
                None => return RowOutcome::Empty,
            },
        };

        let envelope = match Envelope::parse(field) {
            Ok(envelope) => envelope,
            Err(err) => return RowOutcome::Failed(RowError::Malformed(err)),
        };

        let current = self.keys.current().key();
        if decrypt_envelope(&envelope, current).is_ok() {
            return RowOutcome::AlreadyCurrent;
        }

        let legacy = self.keys.legacy();
        let Some(resolved) = resolve_envelope(&envelope, legacy) else {
            return RowOutcome::Failed(RowError::NoMatchingKey {
                tried: legacy.len(),
            });
        };

        let new_value = encrypt_field(&resolved.plaintext, current);
        match decrypt_field(&new_value, current) {
            Ok(check) if check.as_str() == resolved.plaintext.as_str() => {}
            _ => return RowOutcome::Failed(RowError::VerificationFailed),
        }

        let from = resolved.candidate.label().to_string();
        if self.dry_run {
            return RowOutcome::Migrated {
                from,
                written: false,
            };
        }

        match update_field(self.conn, spec, row.id, &new_value) {
            Ok(1) => RowOutcome::Migrated {
                from,
                written: true,
            },
            Ok(changed) => RowOutcome::Failed(RowError::RowNotUpdated(changed)),
            Err(err) => RowOutcome::Failed(RowError::Persistence(err)),
        }
    }
}
