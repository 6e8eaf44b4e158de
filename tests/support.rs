// tests/support.rs
//! Test fixtures — an on-disk application database with the three encrypted tables

use std::path::{Path, PathBuf};

use field_rekey::crypto::{derive, encrypt_field, KeyRing};
use rusqlite::{params, Connection, OptionalExtension};
use tempfile::TempDir;

/// Properly generated 64-hex-char current key
#[allow(dead_code)]
pub const CURRENT_SECRET: &str = "9c1b2e4f7a3d5c6b8e0f1a2b3c4d5e6f708192a3b4c5d6e7f8091a2b3c4d5e6f";

/// The historical 31-byte placeholder that encrypted the oldest data
#[allow(dead_code)]
pub const PLACEHOLDER_SECRET: &str = "default-key-32-chars-long-here!";

/// A human-chosen passphrase used between the placeholder and the hex key
#[allow(dead_code)]
pub const PASSPHRASE_SECRET: &str = "spring-2023 production passphrase";

/// Never configured anywhere
#[allow(dead_code)]
pub const UNKNOWN_SECRET: &str = "a key nobody remembers";

const SCHEMA: &str = r#"
    CREATE TABLE campaigns (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL DEFAULT 'campaign',
        encryptedData TEXT,
        updatedAt TEXT NOT NULL DEFAULT 'untouched'
    );
    CREATE TABLE notes (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL DEFAULT 'note',
        encryptedContent TEXT
    );
    CREATE TABLE documents (
        id INTEGER PRIMARY KEY,
        filename TEXT NOT NULL DEFAULT 'document.pdf',
        encryptedPath TEXT
    );
"#;

#[allow(dead_code)] // Each test binary uses a different subset
pub struct TestDb {
    pub conn: Connection,
    dir: TempDir,
    path: PathBuf,
}

#[allow(dead_code)]
impl TestDb {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("app.db");
        let conn = Connection::open(&path).expect("open app db");
        conn.execute_batch(SCHEMA).expect("create schema");
        Self { conn, dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn insert(&self, table: &str, column: &str, id: i64, value: Option<&str>) {
        self.conn
            .execute(
                &format!(r#"INSERT INTO "{table}" (id, "{column}") VALUES (?1, ?2)"#),
                params![id, value],
            )
            .expect("insert row");
    }

    /// Insert `plaintext` encrypted under the key derived from `secret`
    pub fn insert_encrypted(
        &self,
        table: &str,
        column: &str,
        id: i64,
        plaintext: &str,
        secret: &str,
    ) {
        let field = encrypt_field(plaintext, &derive(secret));
        self.insert(table, column, id, Some(&field));
    }

    pub fn value(&self, table: &str, column: &str, id: i64) -> Option<String> {
        self.conn
            .query_row(
                &format!(r#"SELECT "{column}" FROM "{table}" WHERE id = ?1"#),
                [id],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()
            .expect("select row")
            .flatten()
    }

    pub fn text(&self, sql: &str, id: i64) -> String {
        self.conn
            .query_row(sql, [id], |row| row.get(0))
            .expect("select text")
    }
}

impl Default for TestDb {
    fn default() -> Self {
        Self::new()
    }
}

/// Current hex key + [placeholder, passphrase] legacy keys
#[allow(dead_code)]
pub fn standard_keyring() -> KeyRing {
    KeyRing::new(CURRENT_SECRET, &[PLACEHOLDER_SECRET, PASSPHRASE_SECRET]).expect("keyring")
}
