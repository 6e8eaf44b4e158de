// src/crypto/encrypt.rs
use cbc::cipher::generic_array::GenericArray;
use cbc::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
use rand::RngCore;

use super::derive::DerivedKey;
use super::envelope::Envelope;
use crate::consts::IV_LEN;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;

/// Encrypt a column value → `hex(iv):hex(ciphertext)` under a fresh random IV
pub fn encrypt_field(plaintext: &str, key: &DerivedKey) -> String {
    let mut iv = [0u8; IV_LEN];
    rand::rng().fill_bytes(&mut iv);
    encrypt_with_iv(plaintext, key, iv).to_field()
}

pub(crate) fn encrypt_with_iv(plaintext: &str, key: &DerivedKey, iv: [u8; IV_LEN]) -> Envelope {
    let cipher = Aes256CbcEnc::new(
        GenericArray::from_slice(key.as_bytes()),
        GenericArray::from_slice(&iv),
    );
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
    Envelope { iv, ciphertext }
}
