// src/rotation/mod.rs
//! Legacy-key → current-key migration of encrypted columns
//!
//! This is the core maintenance operation — used by the `migrate-encryption`
//! binary and by anything else that needs to re-key stored fields.
mod outcome;
mod report;
mod runner;

pub use outcome::{OutcomeTally, RowFailure, RowOutcome};
pub use report::{MigrationReport, TableReport};
pub use runner::MigrationRunner;
