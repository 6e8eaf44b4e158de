// src/crypto/derive.rs
//! Configuration secret → 32-byte AES key
//!
//! Rules, first match wins:
//! 1. 64 hex digits → hex-decoded directly
//! 2. exactly 31 UTF-8 bytes → one trailing `0x00`
//! 3. exactly 32 UTF-8 bytes → used as-is
//! 4. anything else → SHA-256 of the UTF-8 bytes

use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::aliases::KeyBytes;
use crate::consts::{HEX_KEY_LEN, KEY_LEN, LEGACY_PLACEHOLDER_LEN};

/// 256-bit cipher key — zeroized on drop, never printed by `Debug`
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_LEN]);

impl DerivedKey {
    #[inline]
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Full hex form — diagnostic tooling only
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short BLAKE3 fingerprint, safe to log
    pub fn fingerprint(&self) -> String {
        let hash = blake3::hash(&self.0);
        hex::encode(&hash.as_bytes()[..8])
    }

    pub fn same_key(&self, other: &DerivedKey) -> bool {
        self.0 == other.0
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerivedKey({})", self.fingerprint())
    }
}

/// Which derivation rule produced a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DerivationRule {
    HexDecoded,
    PlaceholderPadded,
    RawBytes,
    Sha256,
}

impl fmt::Display for DerivationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DerivationRule::HexDecoded => "hex-decoded",
            DerivationRule::PlaceholderPadded => "31-byte placeholder, NUL-padded",
            DerivationRule::RawBytes => "raw 32 bytes",
            DerivationRule::Sha256 => "SHA-256",
        };
        f.write_str(name)
    }
}

#[inline]
pub fn derive(secret: &str) -> DerivedKey {
    derive_with_rule(secret).0
}

pub fn derive_with_rule(secret: &str) -> (DerivedKey, DerivationRule) {
    if is_hex_key(secret) {
        let mut bytes: KeyBytes = Zeroizing::new([0u8; KEY_LEN]);
        if hex::decode_to_slice(secret, &mut bytes[..]).is_ok() {
            return (DerivedKey(*bytes), DerivationRule::HexDecoded);
        }
    }

    let raw = secret.as_bytes();
    match raw.len() {
        // Compatibility shim for the one historical 31-byte placeholder secret.
        // Deliberately exact-length: do not widen without real legacy ciphertext.
        LEGACY_PLACEHOLDER_LEN => {
            let mut bytes: KeyBytes = Zeroizing::new([0u8; KEY_LEN]);
            bytes[..LEGACY_PLACEHOLDER_LEN].copy_from_slice(raw);
            (DerivedKey(*bytes), DerivationRule::PlaceholderPadded)
        }
        KEY_LEN => {
            let mut bytes: KeyBytes = Zeroizing::new([0u8; KEY_LEN]);
            bytes.copy_from_slice(raw);
            (DerivedKey(*bytes), DerivationRule::RawBytes)
        }
        _ => (DerivedKey(sha256(raw)), DerivationRule::Sha256),
    }
}

/// 64 characters, every one an ASCII hex digit
pub fn is_hex_key(secret: &str) -> bool {
    secret.len() == HEX_KEY_LEN && secret.bytes().all(|b| b.is_ascii_hexdigit())
}

pub(crate) fn sha256(data: &[u8]) -> [u8; KEY_LEN] {
    Sha256::digest(data).into()
}
