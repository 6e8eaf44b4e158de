// src/rotation/outcome.rs
use std::fmt;
use std::ops::AddAssign;

use serde::Serialize;

use crate::error::RowError;

/// What happened to one row
#[derive(Debug)]
pub enum RowOutcome {
    /// Already decrypts under the current key
    AlreadyCurrent,
    /// NULL or empty column — nothing to migrate
    Empty,
    /// Re-encrypted from a legacy key; `written` is false in a dry run
    Migrated { from: String, written: bool },
    Failed(RowError),
}

impl fmt::Display for RowOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowOutcome::AlreadyCurrent => f.write_str("skipped (already current)"),
            RowOutcome::Empty => f.write_str("skipped (empty)"),
            RowOutcome::Migrated {
                from,
                written: true,
            } => write!(f, "migrated from {from}"),
            RowOutcome::Migrated {
                from,
                written: false,
            } => write!(f, "would migrate from {from}"),
            RowOutcome::Failed(err) => write!(f, "failed: {err}"),
        }
    }
}

/// Per-table `{migrated, skipped, failed}` counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeTally {
    pub migrated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl OutcomeTally {
    pub fn record(&mut self, outcome: &RowOutcome) {
        match outcome {
            RowOutcome::Migrated { .. } => self.migrated += 1,
            RowOutcome::AlreadyCurrent | RowOutcome::Empty => self.skipped += 1,
            RowOutcome::Failed(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.migrated + self.skipped + self.failed
    }
}

impl AddAssign for OutcomeTally {
    fn add_assign(&mut self, rhs: Self) {
        self.migrated += rhs.migrated;
        self.skipped += rhs.skipped;
        self.failed += rhs.failed;
    }
}

impl fmt::Display for OutcomeTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "migrated={} skipped={} failed={}",
            self.migrated, self.skipped, self.failed
        )
    }
}

/// A row that needs manual follow-up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    pub id: i64,
    pub cause: String,
}
