//! Fingerprint transforms.

mod plain;
mod signing;

use std::sync::Arc;

use consent_sdk::{AttributeCipher, CipherError};

pub use plain::PlainCipher;
pub use signing::SigningCipher;

use crate::config::{CipherConfig, CipherMode};

/// Creates the transform selected by configuration.
///
/// # Errors
///
/// `InvalidKey` when `signed` mode lacks a usable signing key.
pub fn build_cipher(cfg: &CipherConfig) -> Result<Arc<dyn AttributeCipher>, CipherError> {
    match cfg.mode {
        CipherMode::Plain => Ok(Arc::new(PlainCipher)),
        CipherMode::Signed => {
            let key = cfg.signing_key.as_ref().ok_or_else(|| {
                CipherError::InvalidKey("signed mode requires a signing_key".to_owned())
            })?;
            Ok(Arc::new(SigningCipher::new(key)?))
        }
    }
}
