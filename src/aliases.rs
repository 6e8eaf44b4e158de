// src/aliases.rs
//! Secret-holding type aliases
//!
//! These are the canonical wrappers used throughout field-rekey. Everything
//! here zeroizes its buffer on drop.

use zeroize::Zeroizing;

use crate::consts::KEY_LEN;

/// Raw configuration secret (hex key or passphrase) before derivation
pub type KeySecret = Zeroizing<String>;

/// Decrypted column value
pub type PlainText = Zeroizing<String>;

/// Scratch buffer for key bytes during derivation
pub type KeyBytes = Zeroizing<[u8; KEY_LEN]>;
