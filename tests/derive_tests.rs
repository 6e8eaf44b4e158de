// tests/derive_tests.rs
use field_rekey::consts::KEY_LEN;
use field_rekey::crypto::{
    decrypt_field, derive, derive_with_rule, encrypt_field, is_hex_key, DerivationRule,
};

const PLACEHOLDER: &str = "default-key-32-chars-long-here!";

#[test]
fn test_derive_is_deterministic_and_always_32_bytes() {
    let inputs = [
        String::new(),
        "x".to_string(),
        "a".repeat(31),
        "b".repeat(32),
        "c".repeat(33),
        "d".repeat(1000),
    ];

    for input in &inputs {
        let first = derive(input);
        let second = derive(input);
        assert_eq!(first.as_bytes().len(), KEY_LEN, "len {}", input.len());
        assert_eq!(first.as_bytes(), second.as_bytes(), "len {}", input.len());
    }
}

#[test]
fn test_hex_secret_is_decoded_not_hashed() {
    let secret = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";
    let (key, rule) = derive_with_rule(secret);

    let expected: Vec<u8> = (0u8..32).collect();
    assert_eq!(rule, DerivationRule::HexDecoded);
    assert_eq!(key.as_bytes().as_slice(), expected.as_slice());

    // A hash of the same text is a different key
    assert_ne!(key.to_hex(), sha256_hex(secret));
}

#[test]
fn test_uppercase_hex_secret_is_decoded() {
    let lower = "9c1b2e4f7a3d5c6b8e0f1a2b3c4d5e6f708192a3b4c5d6e7f8091a2b3c4d5e6f";
    let upper = lower.to_ascii_uppercase();

    assert!(is_hex_key(&upper));
    assert_eq!(derive(lower).as_bytes(), derive(&upper).as_bytes());
    assert_eq!(derive(&upper).to_hex(), lower);
}

#[test]
fn test_64_chars_with_non_hex_falls_back_to_sha256() {
    let secret = format!("{}g", "a".repeat(63));
    assert!(!is_hex_key(&secret));

    let (key, rule) = derive_with_rule(&secret);
    assert_eq!(rule, DerivationRule::Sha256);
    assert_eq!(key.to_hex(), sha256_hex(&secret));
}

#[test]
fn test_placeholder_secret_is_nul_padded() {
    assert_eq!(PLACEHOLDER.len(), 31);

    let (key, rule) = derive_with_rule(PLACEHOLDER);
    let mut expected = PLACEHOLDER.as_bytes().to_vec();
    expected.push(0x00);

    assert_eq!(rule, DerivationRule::PlaceholderPadded);
    assert_eq!(key.as_bytes().as_slice(), expected.as_slice());
}

#[test]
fn test_placeholder_key_round_trips() {
    let field = encrypt_field("legacy campaign payload", &derive(PLACEHOLDER));
    let plaintext = decrypt_field(&field, &derive(PLACEHOLDER)).unwrap();
    assert_eq!(plaintext.as_str(), "legacy campaign payload");
}

#[test]
fn test_any_31_byte_secret_is_padded_by_byte_length() {
    // 15 two-byte chars + 1 ASCII = 31 bytes, 16 chars
    let secret = format!("{}a", "é".repeat(15));
    assert_eq!(secret.len(), 31);

    let (key, rule) = derive_with_rule(&secret);
    assert_eq!(rule, DerivationRule::PlaceholderPadded);
    assert_eq!(&key.as_bytes()[..31], secret.as_bytes());
    assert_eq!(key.as_bytes()[31], 0);
}

#[test]
fn test_32_byte_secret_is_used_raw() {
    let secret = "0123456789abcdefghijklmnopqrstuv";
    let (key, rule) = derive_with_rule(secret);

    assert_eq!(rule, DerivationRule::RawBytes);
    assert_eq!(key.as_bytes().as_slice(), secret.as_bytes());
}

#[test]
fn test_other_lengths_use_sha256() {
    // Well-known SHA-256 vectors
    assert_eq!(
        derive("").to_hex(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(
        derive("abc").to_hex(),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );

    for len in [30, 33, 63, 65] {
        let secret = "p".repeat(len);
        let (key, rule) = derive_with_rule(&secret);
        assert_eq!(rule, DerivationRule::Sha256, "len {len}");
        assert_eq!(key.to_hex(), sha256_hex(&secret), "len {len}");
    }
}

#[test]
fn test_debug_output_never_contains_key_material() {
    let key = derive(PLACEHOLDER);
    let debug = format!("{key:?}");

    assert!(!debug.contains(&key.to_hex()));
    assert!(debug.contains(&key.fingerprint()));
    assert_eq!(key.fingerprint().len(), 16);
}

fn sha256_hex(input: &str) -> String {
    use sha2::{Digest, Sha256};
    hex::encode(Sha256::digest(input.as_bytes()))
}
