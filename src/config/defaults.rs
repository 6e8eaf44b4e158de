// src/config/defaults.rs
use crate::config::app::{Config, Run};
use crate::consts::DEFAULT_SAMPLE_SIZE;

pub fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}

/// No keys, no database path, the three built-in tables
pub fn default_config() -> Config {
    Config {
        run: Run::default(),
        ..Config::default()
    }
}
