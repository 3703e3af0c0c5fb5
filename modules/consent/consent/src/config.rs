//! Configuration for the consent module.

use consent_sdk::{ConsentOptions, ConsentReminder};
use secrecy::SecretString;
use serde::Deserialize;

/// Configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsentConfig {
    /// Global switch. When off, consent is never required.
    pub enabled: bool,

    /// Options assigned to decisions built without explicit options.
    pub default_options: ConsentOptions,

    /// Reminder assigned to decisions built without an explicit reminder.
    pub reminder: ConsentReminder,

    /// Keep superseded decisions as per-principal history instead of
    /// discarding them on replace.
    pub retain_history: bool,

    /// Transform applied to attribute fingerprints.
    pub cipher: CipherConfig,
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_options: ConsentOptions::AttributeName,
            reminder: ConsentReminder::default(),
            retain_history: false,
            cipher: CipherConfig::default(),
        }
    }
}

/// Fingerprint transform selection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CipherConfig {
    pub mode: CipherMode,

    /// HMAC key for `signed` mode, at least 32 bytes.
    pub signing_key: Option<SecretString>,
}

/// Fingerprint transform mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CipherMode {
    /// Hex-encoded digest.
    #[default]
    Plain,
    /// Digest wrapped in an HS512-signed JWS.
    Signed,
}
