// src/db/field_ops.rs
//! Row access for encrypted columns: read-all, read-sample, point update
//!
//! Nothing here looks at any column other than the table's id + encrypted pair.

use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, Row};

use super::table::TableSpec;

/// The encrypted column as stored, before any envelope parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredValue {
    Null,
    Text(String),
    /// Not readable as UTF-8 text; reported per row, never fails the read
    Undecodable(String),
}

impl StoredValue {
    /// `None` for NULL, empty text and undecodable values
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StoredValue::Text(text) if !text.is_empty() => Some(text.as_str()),
            _ => None,
        }
    }
}

/// One row's id and encrypted value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub id: i64,
    pub value: StoredValue,
}

fn stored_value(raw: ValueRef<'_>) -> StoredValue {
    match raw {
        ValueRef::Null => StoredValue::Null,
        ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => StoredValue::Text(text.to_owned()),
            Err(err) => StoredValue::Undecodable(format!("stored text is not UTF-8: {err}")),
        },
        other => StoredValue::Undecodable(format!("stored as {}, not TEXT", other.data_type())),
    }
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<FieldRow> {
    Ok(FieldRow {
        id: row.get(0)?,
        value: stored_value(row.get_ref(1)?),
    })
}

/// Every row of the table, ordered by id
pub fn read_rows(conn: &Connection, spec: &TableSpec) -> rusqlite::Result<Vec<FieldRow>> {
    let mut stmt = conn.prepare(&spec.select_sql())?;
    let rows = stmt.query_map([], map_row)?;
    rows.collect()
}

/// The first `limit` rows by id
pub fn read_sample(
    conn: &Connection,
    spec: &TableSpec,
    limit: usize,
) -> rusqlite::Result<Vec<FieldRow>> {
    // SQLite reads a negative LIMIT as "no limit"
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let mut stmt = conn.prepare(&spec.sample_sql())?;
    let rows = stmt.query_map([limit], map_row)?;
    rows.collect()
}

/// Replace one row's encrypted value; returns the number of rows changed
pub fn update_field(
    conn: &Connection,
    spec: &TableSpec,
    id: i64,
    value: &str,
) -> rusqlite::Result<usize> {
    conn.execute(&spec.update_sql(), params![value, id])
}
