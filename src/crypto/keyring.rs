// src/crypto/keyring.rs
//! The current key plus ordered legacy keys, derived once per run

use crate::consts::CURRENT_KEY_LABEL;
use crate::error::ConfigError;

use super::derive::{derive_with_rule, DerivationRule, DerivedKey};

/// A derived key with the label operators see in reports
#[derive(Debug, Clone)]
pub struct KeyCandidate {
    label: String,
    rule: DerivationRule,
    key: DerivedKey,
}

impl KeyCandidate {
    pub fn from_secret(label: impl Into<String>, secret: &str) -> Self {
        let (key, rule) = derive_with_rule(secret);
        Self {
            label: label.into(),
            rule,
            key,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn rule(&self) -> DerivationRule {
        self.rule
    }

    pub fn key(&self) -> &DerivedKey {
        &self.key
    }
}

#[derive(Debug, Clone)]
pub struct KeyRing {
    current: KeyCandidate,
    legacy: Vec<KeyCandidate>,
}

impl KeyRing {
    /// Derive every configured secret; a blank current secret is a config error
    ///
    /// Legacy entries are trimmed and tried in the order given. Blank entries are dropped.
    pub fn new<S: AsRef<str>>(current: &str, legacy: &[S]) -> Result<Self, ConfigError> {
        if current.trim().is_empty() {
            return Err(ConfigError::MissingCurrentKey);
        }

        let legacy = legacy
            .iter()
            .map(|s| AsRef::<str>::as_ref(s).trim())
            .filter(|s| !s.is_empty())
            .enumerate()
            .map(|(i, secret)| KeyCandidate::from_secret(legacy_label(i), secret))
            .collect();

        Ok(Self {
            current: KeyCandidate::from_secret(CURRENT_KEY_LABEL, current),
            legacy,
        })
    }

    /// Migration needs at least one legacy key to migrate *from*
    pub fn require_legacy(&self) -> Result<(), ConfigError> {
        if self.legacy.is_empty() {
            Err(ConfigError::MissingLegacyKeys)
        } else {
            Ok(())
        }
    }

    pub fn current(&self) -> &KeyCandidate {
        &self.current
    }

    pub fn legacy(&self) -> &[KeyCandidate] {
        &self.legacy
    }

    /// Current first, then legacy in configured order
    pub fn all(&self) -> impl Iterator<Item = &KeyCandidate> {
        std::iter::once(&self.current).chain(self.legacy.iter())
    }
}

fn legacy_label(index: usize) -> String {
    format!("legacy#{}", index + 1)
}
