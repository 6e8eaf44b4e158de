// src/crypto/mod.rs
//! Pure cryptographic operations — no I/O, no database
//!
//! Key derivation, the AES-256-CBC field codec and candidate-key resolution.
//! All functions work on in-memory strings and take key material explicitly.
mod decrypt;
mod derive;
mod encrypt;
mod envelope;
mod keyring;
mod resolve;

pub use decrypt::{decrypt_envelope, decrypt_field};
pub use derive::{derive, derive_with_rule, is_hex_key, DerivationRule, DerivedKey};
pub use encrypt::encrypt_field;
pub use envelope::{check_format, Envelope};
pub use keyring::{KeyCandidate, KeyRing};
pub use resolve::{resolve, resolve_envelope, Resolved};

pub(crate) use derive::sha256;
