//! tests/export_tests.rs
//! JSON export of migration reports

mod common;
mod support;

use std::fs;

use field_rekey::crypto::derive;
use field_rekey::db::default_tables;
use field_rekey::export::{export_report_json, report_to_json};
use field_rekey::rotation::MigrationRunner;
use serde_json::Value;
use support::{
    standard_keyring, TestDb, CURRENT_SECRET, PASSPHRASE_SECRET, PLACEHOLDER_SECRET,
    UNKNOWN_SECRET,
};

const SECRET_NOTE: &str = "Wire the deposit to account 0042-7781 before the audit on Monday.";

fn mixed_db() -> TestDb {
    let db = TestDb::new();
    db.insert_encrypted("notes", "encryptedContent", 1, SECRET_NOTE, PLACEHOLDER_SECRET);
    db.insert_encrypted("notes", "encryptedContent", 2, SECRET_NOTE, PASSPHRASE_SECRET);
    db.insert_encrypted("notes", "encryptedContent", 3, SECRET_NOTE, UNKNOWN_SECRET);
    db.insert("documents", "encryptedPath", 10, Some("broken"));
    db
}

#[test]
fn export_contains_totals_and_per_table_breakdown() {
    common::setup();
    let db = mixed_db();
    let keys = standard_keyring();
    let report = MigrationRunner::new(&db.conn, &keys)
        .unwrap()
        .run(&default_tables());

    let path = db.dir().join("report.json");
    export_report_json(&report, &path).expect("export failed");

    let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(json["export_format"], "field-rekey-report-v1");
    assert_eq!(json["dry_run"], false);
    assert_eq!(json["needs_follow_up"], true);
    assert!(json["exported_at"].as_str().unwrap().ends_with('Z'));
    assert_eq!(json["totals"]["migrated"], 2);
    assert_eq!(json["totals"]["skipped"], 0);
    assert_eq!(json["totals"]["failed"], 2);

    let tables = json["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 3);

    let notes = &tables[1];
    assert_eq!(notes["table"], "notes");
    assert_eq!(notes["column"], "encryptedContent");
    assert_eq!(notes["migrated_from"]["legacy#1"], 1);
    assert_eq!(notes["migrated_from"]["legacy#2"], 1);
    assert_eq!(notes["failures"][0]["id"], 3);

    let documents = &tables[2];
    assert_eq!(documents["failures"][0]["id"], 10);
    assert!(documents["unreadable"].is_null());
}

#[test]
fn export_never_contains_key_material_or_plaintext() {
    let db = mixed_db();
    let keys = standard_keyring();
    let report = MigrationRunner::new(&db.conn, &keys)
        .unwrap()
        .run(&default_tables());

    let text = report_to_json(&report).unwrap().to_string();

    assert!(!text.contains(SECRET_NOTE));
    assert!(!text.contains(CURRENT_SECRET));
    assert!(!text.contains(PLACEHOLDER_SECRET));
    assert!(!text.contains(PASSPHRASE_SECRET));
    assert!(!text.contains(&derive(PLACEHOLDER_SECRET).to_hex()));
    assert!(!text.contains(&derive(PASSPHRASE_SECRET).to_hex()));
}

#[test]
fn export_marks_dry_runs() {
    let db = mixed_db();
    let keys = standard_keyring();
    let report = MigrationRunner::new(&db.conn, &keys)
        .unwrap()
        .dry_run(true)
        .run(&default_tables());

    let json = report_to_json(&report).unwrap();
    assert_eq!(json["dry_run"], true);
    assert_eq!(json["totals"]["migrated"], 2);
}
