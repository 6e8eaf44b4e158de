// src/export/json.rs
use std::path::Path;

use chrono::Utc;
use serde_json::{json, Value};

use crate::error::Result;
use crate::rotation::MigrationReport;

/// Build the JSON document for a migration report
///
/// Contains row ids and failure causes only — never key material or plaintext.
pub fn report_to_json(report: &MigrationReport) -> Result<Value> {
    let totals = report.totals();
    Ok(json!({
        "export_format": "field-rekey-report-v1",
        "exported_at": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        "exporter_version": env!("CARGO_PKG_VERSION"),
        "dry_run": report.dry_run,
        "started_at": report.started_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        "finished_at": report.finished_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        "totals": serde_json::to_value(totals)?,
        "needs_follow_up": report.needs_follow_up(),
        "tables": serde_json::to_value(&report.tables)?,
    }))
}

/// Write the report as pretty JSON
pub fn export_report_json<P: AsRef<Path>>(report: &MigrationReport, path: P) -> Result<()> {
    let document = report_to_json(report)?;
    std::fs::write(path.as_ref(), serde_json::to_string_pretty(&document)?)?;
    Ok(())
}
