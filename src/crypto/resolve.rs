// src/crypto/resolve.rs
//! Find which candidate key (if any) opens a field

use super::decrypt::decrypt_envelope;
use super::envelope::Envelope;
use super::keyring::KeyCandidate;
use crate::aliases::PlainText;

/// The first candidate that decrypted the field, with the recovered value
#[derive(Debug)]
pub struct Resolved<'k> {
    pub index: usize,
    pub candidate: &'k KeyCandidate,
    pub plaintext: PlainText,
}

/// Try candidates in order; `None` when the field is malformed or nothing matches
pub fn resolve<'k>(field: &str, candidates: &'k [KeyCandidate]) -> Option<Resolved<'k>> {
    let envelope = Envelope::parse(field).ok()?;
    resolve_envelope(&envelope, candidates)
}

pub fn resolve_envelope<'k>(
    envelope: &Envelope,
    candidates: &'k [KeyCandidate],
) -> Option<Resolved<'k>> {
    candidates
        .iter()
        .enumerate()
        .find_map(|(index, candidate)| {
            decrypt_envelope(envelope, candidate.key())
                .ok()
                .map(|plaintext| Resolved {
                    index,
                    candidate,
                    plaintext,
                })
        })
}
