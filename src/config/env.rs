// src/config/env.rs
//! Environment overrides on top of the config file
//!
//! Only the binaries read the real environment; everything below them takes
//! key material as plain arguments.

use std::path::PathBuf;

use crate::config::app::Config;
use crate::consts::{ENV_CURRENT_KEY, ENV_DATABASE_PATH, ENV_LEGACY_KEYS};

/// Comma-separated, each entry trimmed, empty entries dropped; order is kept
pub fn parse_legacy_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

pub(crate) fn apply_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(current) = lookup(ENV_CURRENT_KEY).filter(|v| !v.trim().is_empty()) {
        config.keys.current = Some(current);
    }
    if let Some(legacy) = lookup(ENV_LEGACY_KEYS) {
        config.keys.legacy = parse_legacy_keys(&legacy);
    }
    if let Some(path) = lookup(ENV_DATABASE_PATH).filter(|v| !v.is_empty()) {
        config.database.path = Some(PathBuf::from(path));
    }
}
