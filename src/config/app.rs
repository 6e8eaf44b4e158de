// src/config/app.rs
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::defaults::{default_config, default_sample_size};
use super::env::apply_overrides;
use crate::consts::{CONFIG_DIR_NAME, DEFAULT_CONFIG_FILE, ENV_CONFIG_PATH};
use crate::crypto::KeyRing;
use crate::db::{default_tables, TableConfig, TableSpec};
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub keys: Keys,
    pub database: Database,
    pub tables: Vec<TableConfig>,
    pub run: Run,
}

/// Key sources — raw secrets, derived later by `KeyRing`
///
/// Defaults are per field: a struct-level default would move out of a `Drop` type.
#[derive(Clone, Default, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Keys {
    #[serde(default)]
    pub current: Option<String>,
    #[serde(default)]
    pub legacy: Vec<String>,
}

impl fmt::Debug for Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keys")
            .field("current", &self.current.as_ref().map(|_| "<redacted>"))
            .field("legacy", &format_args!("<{} redacted>", self.legacy.len()))
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Database {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Run {
    pub sample_size: usize,
}

impl Default for Run {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Apply environment-style overrides from any lookup (tests pass a map)
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        apply_overrides(&mut self, lookup);
        self
    }

    /// Derive the current + legacy keys; missing current key is fatal
    pub fn keyring(&self) -> Result<KeyRing, ConfigError> {
        let current = self
            .keys
            .current
            .as_deref()
            .ok_or(ConfigError::MissingCurrentKey)?;
        KeyRing::new(current, &self.keys.legacy)
    }

    /// Configured tables, or the three built-in ones
    pub fn table_specs(&self) -> Result<Vec<TableSpec>, ConfigError> {
        if self.tables.is_empty() {
            return Ok(default_tables());
        }
        self.tables.iter().map(TableSpec::try_from).collect()
    }

    pub fn database_path(&self) -> Result<&Path, ConfigError> {
        self.database
            .path
            .as_deref()
            .ok_or(ConfigError::MissingDatabasePath)
    }
}

/// Load config from the real process environment
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    load_with(explicit, |name| std::env::var(name).ok())
}

/// Config file (explicit path, `REKEY_CONFIG`, `./rekey.toml`, then the
/// platform config dir), then environment overrides on top
pub fn load_with<F>(explicit: Option<&Path>, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let required = explicit
        .map(Path::to_path_buf)
        .or_else(|| lookup(ENV_CONFIG_PATH).map(PathBuf::from));

    let config = match required {
        Some(path) => {
            info!("Loading config from {}", path.display());
            Config::from_file(&path)?
        }
        None => match discover_config_file() {
            Some(path) => {
                info!("Loading config from {}", path.display());
                Config::from_file(&path)?
            }
            None => {
                warn!("{DEFAULT_CONFIG_FILE} not found — using built-in defaults");
                default_config()
            }
        },
    };

    Ok(config.with_overrides(lookup))
}

fn discover_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join("config.toml"))
        .filter(|path| path.exists())
}
