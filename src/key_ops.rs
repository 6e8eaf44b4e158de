// src/key_ops.rs
//! Printable representations of derived keys
//!
//! Used only by the diagnostic tooling, and only when the operator asks
//! for key material to be shown.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::Serialize;

use crate::crypto::DerivedKey;

/// Multiple string representations of a key for display
#[derive(Debug, Clone, Serialize)]
pub struct KeyRepr {
    pub hex: String,
    pub base64: String,
    pub base64url_no_pad: String,
}

pub fn key_representations(key: &DerivedKey) -> KeyRepr {
    KeyRepr {
        hex: key.to_hex(),
        base64: STANDARD.encode(key.as_bytes()),
        base64url_no_pad: URL_SAFE_NO_PAD.encode(key.as_bytes()),
    }
}
