// src/error.rs
//! Public error types for the entire crate
//!
//! `ConfigError` is the only fatal kind during a migration. `CryptoError` and
//! `RowError` are per-row and always folded into the run's tally.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Precondition failures — raised before any row is touched
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("current encryption key is not configured")]
    MissingCurrentKey,

    #[error("legacy encryption keys are not configured")]
    MissingLegacyKeys,

    #[error("database path is not configured")]
    MissingDatabasePath,

    #[error("invalid SQL identifier {0:?}")]
    InvalidIdentifier(String),

    #[error("unknown table {0:?}")]
    UnknownTable(String),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Why a stored value is not a valid `hex(iv):hex(ciphertext)` envelope
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormatError {
    #[error("expected exactly one ':' separator")]
    Separator,

    #[error("IV is not valid hex")]
    IvHex,

    #[error("IV must be 16 bytes, got {0}")]
    IvLength(usize),

    #[error("ciphertext is not valid hex")]
    CiphertextHex,

    #[error("ciphertext length {0} is not a positive multiple of the block size")]
    CiphertextLength(usize),
}

/// Outcome of decrypting one field with one key
///
/// Both variants mean "this key does not open this field"; neither is fatal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoError {
    #[error("malformed field: {0}")]
    MalformedField(#[from] FieldFormatError),

    #[error("key does not match field")]
    KeyMismatch,
}

/// Per-row failure recorded in a migration report
#[derive(Error, Debug)]
pub enum RowError {
    #[error("malformed field: {0}")]
    Malformed(FieldFormatError),

    #[error("malformed field: {0}")]
    Undecodable(String),

    #[error("no configured key decrypts this field ({tried} legacy key(s) tried)")]
    NoMatchingKey { tried: usize },

    #[error("re-encrypted value did not decrypt under the current key")]
    VerificationFailed,

    #[error("write failed: {0}")]
    Persistence(#[source] rusqlite::Error),

    #[error("update touched {0} row(s), expected 1")]
    RowNotUpdated(usize),
}

pub type Result<T> = std::result::Result<T, CoreError>;
