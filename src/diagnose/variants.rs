// src/diagnose/variants.rs
//! Forensic recovery: try every historical way a passphrase may have become a key
//!
//! The derivation rule used to produce old ciphertext was not always recorded,
//! so this probes a fixed list of plausible rules against one field.

use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha512};
use zeroize::Zeroizing;

use crate::aliases::{KeyBytes, PlainText};
use crate::consts::KEY_LEN;
use crate::crypto::{decrypt_envelope, sha256, DerivedKey, Envelope};
use crate::error::FieldFormatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KeyVariant {
    RawBytes,
    NullPadded,
    SpacePadded,
    Sha256,
    Sha256TrailingNewline,
    Sha256Trimmed,
    Sha512Truncated,
    Repeated,
}

impl KeyVariant {
    /// Probe order
    pub const ALL: [KeyVariant; 8] = [
        KeyVariant::RawBytes,
        KeyVariant::NullPadded,
        KeyVariant::SpacePadded,
        KeyVariant::Sha256,
        KeyVariant::Sha256TrailingNewline,
        KeyVariant::Sha256Trimmed,
        KeyVariant::Sha512Truncated,
        KeyVariant::Repeated,
    ];

    /// `None` when the variant cannot apply to this guess
    pub fn derive(self, guess: &str) -> Option<DerivedKey> {
        let raw = guess.as_bytes();
        let key = match self {
            KeyVariant::RawBytes => DerivedKey::from_bytes(raw.try_into().ok()?),
            KeyVariant::NullPadded => DerivedKey::from_bytes(*padded(raw, 0x00)),
            KeyVariant::SpacePadded => DerivedKey::from_bytes(*padded(raw, b' ')),
            KeyVariant::Sha256 => DerivedKey::from_bytes(sha256(raw)),
            KeyVariant::Sha256TrailingNewline => {
                let with_newline = Zeroizing::new(format!("{guess}\n"));
                DerivedKey::from_bytes(sha256(with_newline.as_bytes()))
            }
            KeyVariant::Sha256Trimmed => DerivedKey::from_bytes(sha256(guess.trim().as_bytes())),
            KeyVariant::Sha512Truncated => {
                let digest = Sha512::digest(raw);
                let mut bytes: KeyBytes = Zeroizing::new([0u8; KEY_LEN]);
                bytes.copy_from_slice(&digest[..KEY_LEN]);
                DerivedKey::from_bytes(*bytes)
            }
            KeyVariant::Repeated => {
                if raw.is_empty() {
                    return None;
                }
                let mut bytes: KeyBytes = Zeroizing::new([0u8; KEY_LEN]);
                for (dst, src) in bytes.iter_mut().zip(raw.iter().cycle()) {
                    *dst = *src;
                }
                DerivedKey::from_bytes(*bytes)
            }
        };
        Some(key)
    }
}

impl fmt::Display for KeyVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyVariant::RawBytes => "raw bytes",
            KeyVariant::NullPadded => "NUL-padded",
            KeyVariant::SpacePadded => "space-padded",
            KeyVariant::Sha256 => "SHA-256",
            KeyVariant::Sha256TrailingNewline => "SHA-256 with trailing newline",
            KeyVariant::Sha256Trimmed => "SHA-256 of trimmed input",
            KeyVariant::Sha512Truncated => "SHA-512 truncated to 32 bytes",
            KeyVariant::Repeated => "repeated to 32 bytes",
        };
        f.write_str(name)
    }
}

/// Truncate or pad to exactly 32 bytes
fn padded(raw: &[u8], fill: u8) -> KeyBytes {
    let mut bytes: KeyBytes = Zeroizing::new([fill; KEY_LEN]);
    let n = raw.len().min(KEY_LEN);
    bytes[..n].copy_from_slice(&raw[..n]);
    bytes
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum VariantOutcome {
    Matched { plaintext_len: usize },
    NoMatch,
    NotApplicable,
    /// Derived the same key as an earlier variant; not tried again
    SameKeyAs(KeyVariant),
}

#[derive(Debug, Clone, Serialize)]
pub struct VariantProbe {
    pub variant: KeyVariant,
    pub outcome: VariantOutcome,
    pub fingerprint: Option<String>,
}

impl fmt::Display for VariantProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<32} ", self.variant.to_string())?;
        match &self.outcome {
            VariantOutcome::Matched { plaintext_len } => {
                write!(f, "MATCH ({plaintext_len} bytes)")?
            }
            VariantOutcome::NoMatch => f.write_str("no match")?,
            VariantOutcome::NotApplicable => f.write_str("n/a")?,
            VariantOutcome::SameKeyAs(earlier) => write!(f, "same key as {earlier}")?,
        }
        if let Some(fp) = &self.fingerprint {
            write!(f, " [{fp}]")?;
        }
        Ok(())
    }
}

/// The first variant that opened the field
#[derive(Debug)]
pub struct VariantMatch {
    pub variant: KeyVariant,
    pub key: DerivedKey,
    pub plaintext: PlainText,
}

/// Every variant's key, with later duplicates pointing back at the first
fn variant_keys(guess: &str) -> Vec<(KeyVariant, Result<DerivedKey, VariantOutcome>)> {
    let mut seen: Vec<(KeyVariant, DerivedKey)> = Vec::new();
    KeyVariant::ALL
        .iter()
        .map(|&variant| {
            let key = match variant.derive(guess) {
                None => Err(VariantOutcome::NotApplicable),
                Some(key) => match seen.iter().find(|(_, k)| k.same_key(&key)) {
                    Some((earlier, _)) => Err(VariantOutcome::SameKeyAs(*earlier)),
                    None => {
                        seen.push((variant, key.clone()));
                        Ok(key)
                    }
                },
            };
            (variant, key)
        })
        .collect()
}

/// Try every variant and report each outcome; use this to confirm a single match
pub fn probe_variants(field: &str, guess: &str) -> Result<Vec<VariantProbe>, FieldFormatError> {
    let envelope = Envelope::parse(field)?;
    let probes = variant_keys(guess)
        .into_iter()
        .map(|(variant, key)| match key {
            Ok(key) => VariantProbe {
                variant,
                outcome: match decrypt_envelope(&envelope, &key) {
                    Ok(plaintext) => VariantOutcome::Matched {
                        plaintext_len: plaintext.len(),
                    },
                    Err(_) => VariantOutcome::NoMatch,
                },
                fingerprint: Some(key.fingerprint()),
            },
            Err(outcome) => VariantProbe {
                variant,
                outcome,
                fingerprint: None,
            },
        })
        .collect();
    Ok(probes)
}

/// First variant that decrypts the field; `Ok(None)` means every variant failed
pub fn brute_force_variants(
    field: &str,
    guess: &str,
) -> Result<Option<VariantMatch>, FieldFormatError> {
    let envelope = Envelope::parse(field)?;
    let found = variant_keys(guess)
        .into_iter()
        .filter_map(|(variant, key)| key.ok().map(|key| (variant, key)))
        .find_map(|(variant, key)| {
            decrypt_envelope(&envelope, &key)
                .ok()
                .map(|plaintext| VariantMatch {
                    variant,
                    key,
                    plaintext,
                })
        });
    Ok(found)
}
