// src/crypto/envelope.rs
//! The at-rest field format: `hex(iv) ":" hex(ciphertext)`

use crate::consts::{FIELD_SEPARATOR, IV_LEN};
use crate::error::FieldFormatError;

const BLOCK_LEN: usize = 16;

/// A parsed, structurally valid field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub iv: [u8; IV_LEN],
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    pub fn parse(field: &str) -> Result<Self, FieldFormatError> {
        let (iv_hex, ct_hex) = field
            .split_once(FIELD_SEPARATOR)
            .ok_or(FieldFormatError::Separator)?;
        if ct_hex.contains(FIELD_SEPARATOR) {
            return Err(FieldFormatError::Separator);
        }

        let iv_bytes = hex::decode(iv_hex).map_err(|_| FieldFormatError::IvHex)?;
        let iv: [u8; IV_LEN] = iv_bytes
            .as_slice()
            .try_into()
            .map_err(|_| FieldFormatError::IvLength(iv_bytes.len()))?;

        let ciphertext = hex::decode(ct_hex).map_err(|_| FieldFormatError::CiphertextHex)?;
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
            return Err(FieldFormatError::CiphertextLength(ciphertext.len()));
        }

        Ok(Self { iv, ciphertext })
    }

    /// Lowercase hex, one separator
    pub fn to_field(&self) -> String {
        format!(
            "{}{FIELD_SEPARATOR}{}",
            hex::encode(self.iv),
            hex::encode(&self.ciphertext)
        )
    }
}

/// Structural check only — says nothing about which key opens it
pub fn check_format(field: &str) -> Result<(), FieldFormatError> {
    Envelope::parse(field).map(|_| ())
}
