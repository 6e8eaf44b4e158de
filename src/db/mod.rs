// src/db/mod.rs
pub mod app_db_conn;
pub mod field_ops;
pub mod table;

pub use app_db_conn::{open_app_db, open_app_db_read_only};
pub use field_ops::{read_rows, read_sample, update_field, FieldRow, StoredValue};
pub use table::{default_tables, select_tables, TableConfig, TableSpec};
