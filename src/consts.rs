// src/consts.rs
//! Shared constants — cipher parameters, envelope format and defaults

/// AES-256 key length in bytes
pub const KEY_LEN: usize = 32;

/// CBC initialization vector length in bytes
pub const IV_LEN: usize = 16;

/// Length of a hex-encoded 256-bit key (`derive` fast path)
pub const HEX_KEY_LEN: usize = KEY_LEN * 2;

/// Length of the historical placeholder secret that gets one trailing NUL byte
// Only this exact length is padded — see crypto::derive
pub const LEGACY_PLACEHOLDER_LEN: usize = 31;

/// Separator between hex(iv) and hex(ciphertext) in a stored field
pub const FIELD_SEPARATOR: char = ':';

/// Rows inspected per table by the diagnostic sample
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// Default id column of every migratable table
pub const DEFAULT_ID_COLUMN: &str = "id";

/// Label of the current key in reports
pub const CURRENT_KEY_LABEL: &str = "current";

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "rekey.toml";

/// Config sub-directory under the platform config dir
pub const CONFIG_DIR_NAME: &str = "field-rekey";

pub const ENV_CONFIG_PATH: &str = "REKEY_CONFIG";
pub const ENV_CURRENT_KEY: &str = "ENCRYPTION_KEY";
pub const ENV_LEGACY_KEYS: &str = "LEGACY_ENCRYPTION_KEYS";
pub const ENV_DATABASE_PATH: &str = "REKEY_DATABASE";
