// src/export/mod.rs
//! Export utilities for field-rekey
//!
//! Machine-readable copies of migration reports for follow-up on failed rows.

pub use json::{export_report_json, report_to_json};

pub mod json;
