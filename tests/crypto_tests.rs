// tests/crypto_tests.rs
use field_rekey::crypto::{
    check_format, decrypt_field, derive, encrypt_field, resolve, DerivedKey, Envelope,
    KeyCandidate,
};
use field_rekey::error::{CryptoError, FieldFormatError};

fn random_key() -> DerivedKey {
    DerivedKey::from_bytes(rand::random::<[u8; 32]>())
}

#[test]
fn test_encrypt_decrypt_roundtrip() {
    let key = random_key();
    let long = "long body ".repeat(500);
    let plaintexts = [
        "",
        "a",
        "exactly sixteen!",
        "{\"subject\":\"Spring sale\",\"segments\":[1,2,3]}",
        "/uploads/2023/11/contract - signé.pdf",
        long.as_str(),
    ];

    for plaintext in plaintexts {
        let field = encrypt_field(plaintext, &key);
        let decrypted = decrypt_field(&field, &key).unwrap();
        assert_eq!(decrypted.as_str(), plaintext);
    }
}

#[test]
fn test_field_format_is_hex_iv_colon_hex_ciphertext() {
    let field = encrypt_field("exactly sixteen!", &random_key());
    let (iv, ct) = field.split_once(':').unwrap();

    assert_eq!(field.matches(':').count(), 1);
    assert_eq!(iv.len(), 32);
    // 16 bytes of plaintext + a full padding block
    assert_eq!(ct.len(), 64);
    assert!(field
        .chars()
        .all(|c| c == ':' || c.is_ascii_digit() || ('a'..='f').contains(&c)));
    assert!(check_format(&field).is_ok());
}

#[test]
fn test_each_encryption_uses_a_fresh_iv() {
    let key = random_key();
    let a = encrypt_field("same plaintext", &key);
    let b = encrypt_field("same plaintext", &key);

    assert_ne!(a, b);
    assert_ne!(a.split(':').next(), b.split(':').next());
}

#[test]
fn test_envelope_parse_and_format_are_inverse() {
    let field = encrypt_field("note body", &random_key());
    let envelope = Envelope::parse(&field).unwrap();
    assert_eq!(envelope.to_field(), field);
}

#[test]
fn test_malformed_fields_are_recoverable_errors() {
    let key = random_key();
    let good = encrypt_field("payload", &key);
    let (iv, ct) = good.split_once(':').unwrap();

    let cases = [
        (ct.to_string(), FieldFormatError::Separator),
        (format!("{iv}:{ct}:{ct}"), FieldFormatError::Separator),
        (format!("zz{}:{ct}", &iv[2..]), FieldFormatError::IvHex),
        (format!("{}:{ct}", &iv[..30]), FieldFormatError::IvLength(15)),
        (format!("{iv}:{}xyz", &ct[..29]), FieldFormatError::CiphertextHex),
        (format!("{iv}:"), FieldFormatError::CiphertextLength(0)),
        (format!("{iv}:{}", &ct[..30]), FieldFormatError::CiphertextLength(15)),
    ];

    for (field, expected) in cases {
        assert_eq!(
            decrypt_field(&field, &key).unwrap_err(),
            CryptoError::MalformedField(expected),
            "field {field:?}"
        );
    }
}

#[test]
fn test_decrypt_fails_with_wrong_key() {
    let field = encrypt_field(&"campaign body ".repeat(8), &random_key());
    let wrong = decrypt_field(&field, &random_key());

    assert_eq!(wrong.unwrap_err(), CryptoError::KeyMismatch);
}

#[test]
fn test_cross_key_decrypt_never_falsely_accepts() {
    let mut false_accepts = 0;

    for i in 0..10_000 {
        let k1 = random_key();
        let k2 = random_key();
        assert!(!k1.same_key(&k2));

        let plaintext = format!("{{\"id\":{i},\"body\":\"{}\"}}", "lorem ipsum ".repeat(4));
        let field = encrypt_field(&plaintext, &k1);
        match decrypt_field(&field, &k2) {
            Err(CryptoError::KeyMismatch) => {}
            Err(other) => panic!("unexpected error {other:?}"),
            Ok(_) => false_accepts += 1,
        }
    }

    assert_eq!(false_accepts, 0);
}

#[test]
fn test_resolve_returns_first_matching_candidate() {
    let candidates = vec![
        KeyCandidate::from_secret("legacy#1", "first passphrase"),
        KeyCandidate::from_secret("legacy#2", "second passphrase"),
        KeyCandidate::from_secret("legacy#3", "third passphrase"),
    ];
    let field = encrypt_field("document path", &derive("second passphrase"));

    let resolved = resolve(&field, &candidates).unwrap();
    assert_eq!(resolved.index, 1);
    assert_eq!(resolved.candidate.label(), "legacy#2");
    assert_eq!(resolved.plaintext.as_str(), "document path");
}

#[test]
fn test_resolve_prefers_earlier_candidate_with_same_key() {
    let candidates = vec![
        KeyCandidate::from_secret("a", "shared secret"),
        KeyCandidate::from_secret("b", "shared secret"),
    ];
    let field = encrypt_field("x", &derive("shared secret"));

    assert_eq!(resolve(&field, &candidates).unwrap().candidate.label(), "a");
}

#[test]
fn test_resolve_returns_none_when_nothing_matches() {
    let candidates = vec![
        KeyCandidate::from_secret("legacy#1", "first passphrase"),
        KeyCandidate::from_secret("legacy#2", "second passphrase"),
    ];
    let field = encrypt_field(&"orphaned row ".repeat(4), &derive("some other key"));

    assert!(resolve(&field, &candidates).is_none());
    assert!(resolve("not a field", &candidates).is_none());
    assert!(resolve(&field, &[]).is_none());
}
