// src/config/mod.rs
//! Configuration system for field-rekey
//!
//! TOML file + environment overrides, loaded explicitly by the binaries.

pub use app::{load, load_with, Config, Database, Keys, Run};
pub use env::parse_legacy_keys;

mod app;
mod defaults;
mod env;
