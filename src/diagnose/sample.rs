// src/diagnose/sample.rs
//! Read-only check of which configured key opens the first rows of each table

use std::fmt;

use rusqlite::Connection;
use serde::Serialize;

use crate::crypto::{decrypt_envelope, resolve_envelope, DerivationRule, Envelope, KeyRing};
use crate::db::{read_sample, FieldRow, StoredValue, TableSpec};
use crate::key_ops::{key_representations, KeyRepr};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SampleState {
    Empty,
    Malformed { reason: String },
    Matched { key: String, plaintext_len: usize },
    NoMatch,
}

impl fmt::Display for SampleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleState::Empty => f.write_str("empty"),
            SampleState::Malformed { reason } => write!(f, "MALFORMED ({reason})"),
            SampleState::Matched { key, plaintext_len } => {
                write!(f, "matches {key} ({plaintext_len} bytes)")
            }
            SampleState::NoMatch => f.write_str("NO KEY MATCHES"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SampleRow {
    pub id: i64,
    pub state: SampleState,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableSample {
    pub table: String,
    pub column: String,
    pub rows: Vec<SampleRow>,
    pub unreadable: Option<String>,
}

impl TableSample {
    /// Rows opened by the key with this label
    pub fn matched_by(&self, label: &str) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(&r.state, SampleState::Matched { key, .. } if key == label))
            .count()
    }
}

impl fmt::Display for TableSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--- {}.{} ---", self.table, self.column)?;
        if let Some(cause) = &self.unreadable {
            return write!(f, "\n  UNREADABLE ({cause})");
        }
        if self.rows.is_empty() {
            return write!(f, "\n  (no rows)");
        }
        for row in &self.rows {
            write!(f, "\n  id={}: {}", row.id, row.state)?;
        }
        Ok(())
    }
}

/// Current key first, then each legacy key in order
pub fn sample_row(keys: &KeyRing, row: &FieldRow) -> SampleState {
    let field = match &row.value {
        StoredValue::Undecodable(reason) => {
            return SampleState::Malformed {
                reason: reason.clone(),
            }
        }
        value => match value.as_text() {
            Some(field) => field,
            None => return SampleState::Empty,
        },
    };
    let envelope = match Envelope::parse(field) {
        Ok(envelope) => envelope,
        Err(err) => {
            return SampleState::Malformed {
                reason: err.to_string(),
            }
        }
    };

    let current = keys.current();
    if let Ok(plaintext) = decrypt_envelope(&envelope, current.key()) {
        return SampleState::Matched {
            key: current.label().to_string(),
            plaintext_len: plaintext.len(),
        };
    }

    match resolve_envelope(&envelope, keys.legacy()) {
        Some(resolved) => SampleState::Matched {
            key: resolved.candidate.label().to_string(),
            plaintext_len: resolved.plaintext.len(),
        },
        None => SampleState::NoMatch,
    }
}

/// Inspect the first `n` rows of one table; writes nothing
pub fn report_sample(
    conn: &Connection,
    spec: &TableSpec,
    keys: &KeyRing,
    n: usize,
) -> rusqlite::Result<TableSample> {
    let rows = read_sample(conn, spec, n)?
        .iter()
        .map(|row| SampleRow {
            id: row.id,
            state: sample_row(keys, row),
        })
        .collect();

    Ok(TableSample {
        table: spec.table().to_string(),
        column: spec.column().to_string(),
        rows,
        unreadable: None,
    })
}

/// `report_sample` over several tables; an unreadable table does not stop the rest
pub fn report_samples(
    conn: &Connection,
    tables: &[TableSpec],
    keys: &KeyRing,
    n: usize,
) -> Vec<TableSample> {
    tables
        .iter()
        .map(|spec| {
            report_sample(conn, spec, keys, n).unwrap_or_else(|err| TableSample {
                table: spec.table().to_string(),
                column: spec.column().to_string(),
                rows: Vec::new(),
                unreadable: Some(err.to_string()),
            })
        })
        .collect()
}

/// How each configured secret was turned into a key
#[derive(Debug, Clone, Serialize)]
pub struct KeyDescription {
    pub label: String,
    pub rule: DerivationRule,
    pub fingerprint: String,
    /// Full key material — only present when explicitly requested
    pub repr: Option<KeyRepr>,
}

impl fmt::Display for KeyDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<10} fingerprint={} rule={}",
            self.label, self.fingerprint, self.rule
        )?;
        if let Some(repr) = &self.repr {
            write!(f, "\n           hex={}", repr.hex)?;
        }
        Ok(())
    }
}

pub fn describe_keys(keys: &KeyRing, show_key_material: bool) -> Vec<KeyDescription> {
    keys.all()
        .map(|candidate| KeyDescription {
            label: candidate.label().to_string(),
            rule: candidate.rule(),
            fingerprint: candidate.key().fingerprint(),
            repr: show_key_material.then(|| key_representations(candidate.key())),
        })
        .collect()
}
