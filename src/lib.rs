// src/lib.rs
//! field-rekey — re-keying of at-rest encrypted database columns
//!
//! Features:
//! - Deterministic key derivation from hex keys or passphrases
//! - AES-256-CBC `hex(iv):hex(ciphertext)` field codec
//! - Legacy-key resolution and idempotent, per-row re-encryption
//! - Read-only diagnostics and forensic key-variant probing

pub mod aliases;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod db;
pub mod diagnose;
pub mod export;
pub mod key_ops;
pub mod rotation;

pub mod error;

// Re-export everything users need at the crate root
pub use config::load as load_config;
pub use crypto::{decrypt_field, derive, encrypt_field, resolve, DerivedKey, KeyRing};
pub use db::{default_tables, TableSpec};
pub use diagnose::{brute_force_variants, probe_variants, report_sample};
pub use error::{ConfigError, CoreError, CryptoError, RowError};
pub use export::export_report_json;
pub use rotation::{MigrationReport, MigrationRunner, OutcomeTally};
