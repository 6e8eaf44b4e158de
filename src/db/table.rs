// src/db/table.rs
//! Descriptors for the encrypted columns a migration may touch

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_ID_COLUMN;
use crate::error::ConfigError;

/// One table, its integer id column and its single encrypted text column
///
/// Identifiers are validated on construction and always quoted in SQL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSpec {
    table: String,
    id_column: String,
    column: String,
}

impl TableSpec {
    pub fn new(table: &str, id_column: &str, column: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            table: validate_identifier(table)?,
            id_column: validate_identifier(id_column)?,
            column: validate_identifier(column)?,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub(crate) fn select_sql(&self) -> String {
        format!(
            r#"SELECT "{id}", "{col}" FROM "{table}" ORDER BY "{id}""#,
            id = self.id_column,
            col = self.column,
            table = self.table
        )
    }

    pub(crate) fn sample_sql(&self) -> String {
        format!("{} LIMIT ?1", self.select_sql())
    }

    pub(crate) fn update_sql(&self) -> String {
        format!(
            r#"UPDATE "{table}" SET "{col}" = ?1 WHERE "{id}" = ?2"#,
            table = self.table,
            col = self.column,
            id = self.id_column
        )
    }
}

/// Raw `[[tables]]` entry from the config file
#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    pub name: String,
    #[serde(default = "default_id_column")]
    pub id_column: String,
    pub column: String,
}

impl TryFrom<&TableConfig> for TableSpec {
    type Error = ConfigError;

    fn try_from(raw: &TableConfig) -> Result<Self, Self::Error> {
        TableSpec::new(&raw.name, &raw.id_column, &raw.column)
    }
}

fn default_id_column() -> String {
    DEFAULT_ID_COLUMN.to_string()
}

/// campaigns.encryptedData, notes.encryptedContent, documents.encryptedPath
pub fn default_tables() -> Vec<TableSpec> {
    [
        ("campaigns", "encryptedData"),
        ("notes", "encryptedContent"),
        ("documents", "encryptedPath"),
    ]
    .into_iter()
    .map(|(table, column)| TableSpec {
        table: table.to_string(),
        id_column: DEFAULT_ID_COLUMN.to_string(),
        column: column.to_string(),
    })
    .collect()
}

/// Keep only the named tables, in the order given; unknown names are an error
pub fn select_tables(all: &[TableSpec], names: &[String]) -> Result<Vec<TableSpec>, ConfigError> {
    if names.is_empty() {
        return Ok(all.to_vec());
    }
    names
        .iter()
        .map(|name| {
            all.iter()
                .find(|spec| spec.table == *name)
                .cloned()
                .ok_or_else(|| ConfigError::UnknownTable(name.clone()))
        })
        .collect()
}

fn validate_identifier(ident: &str) -> Result<String, ConfigError> {
    let mut chars = ident.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(ident.to_string())
    } else {
        Err(ConfigError::InvalidIdentifier(ident.to_string()))
    }
}
