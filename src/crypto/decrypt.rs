// src/crypto/decrypt.rs
use cbc::cipher::generic_array::GenericArray;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, KeyIvInit};
use zeroize::Zeroizing;

use super::derive::DerivedKey;
use super::envelope::Envelope;
use crate::aliases::PlainText;
use crate::error::CryptoError;

type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

pub type Result<T> = std::result::Result<T, CryptoError>;

/// Decrypt a stored field with one key
///
/// Every failure is recoverable: it only means this key does not open this field.
pub fn decrypt_field(field: &str, key: &DerivedKey) -> Result<PlainText> {
    let envelope = Envelope::parse(field)?;
    decrypt_envelope(&envelope, key)
}

/// Decrypt an already-parsed envelope; non-UTF-8 output counts as a mismatch
pub fn decrypt_envelope(envelope: &Envelope, key: &DerivedKey) -> Result<PlainText> {
    let cipher = Aes256CbcDec::new(
        GenericArray::from_slice(key.as_bytes()),
        GenericArray::from_slice(&envelope.iv),
    );
    let bytes = Zeroizing::new(
        cipher
            .decrypt_padded_vec_mut::<Pkcs7>(&envelope.ciphertext)
            .map_err(|_| CryptoError::KeyMismatch)?,
    );
    let text = std::str::from_utf8(&bytes).map_err(|_| CryptoError::KeyMismatch)?;
    Ok(Zeroizing::new(text.to_owned()))
}
