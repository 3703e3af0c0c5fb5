//! Fingerprints of released attributes.
//!
//! The digest is SHA-256 over a canonical, length-prefixed encoding of the
//! attributes: names in sorted order and, when values take part, each name's
//! values sorted and de-duplicated. Two semantically identical attribute sets
//! therefore hash identically whatever their ordering, while any added,
//! removed or renamed attribute (or changed value, when values take part)
//! yields a different digest. The digest is then passed through the
//! configured [`AttributeCipher`] to obtain the stored token.

use std::collections::BTreeSet;
use std::sync::Arc;

use consent_sdk::{AttributeCipher, CipherError, ConsentOptions};
use sha2::{Digest, Sha256};
use sso_security::Attributes;

const DOMAIN_TAG: &[u8] = b"sso-consent-fingerprint:v1";

/// Computes encoded fingerprints of attribute sets.
#[derive(Debug, Clone)]
pub struct AttributeFingerprinter {
    cipher: Arc<dyn AttributeCipher>,
}

impl AttributeFingerprinter {
    #[must_use]
    pub fn new(cipher: Arc<dyn AttributeCipher>) -> Self {
        Self { cipher }
    }

    #[must_use]
    pub fn cipher(&self) -> &Arc<dyn AttributeCipher> {
        &self.cipher
    }

    /// Encoded fingerprint of `attributes` at the granularity of `options`.
    ///
    /// # Errors
    ///
    /// Propagates the cipher's `Encode` failure.
    pub fn fingerprint(
        &self,
        attributes: &Attributes,
        options: ConsentOptions,
    ) -> Result<String, CipherError> {
        self.cipher.encode(&digest(attributes, options))
    }
}

/// Raw SHA-256 digest of the canonical attribute encoding.
///
/// `AttributeName` covers names only; `AttributeValue` and `Always` cover
/// names and values.
#[must_use]
pub fn digest(attributes: &Attributes, options: ConsentOptions) -> [u8; 32] {
    let with_values = !matches!(options, ConsentOptions::AttributeName);

    let mut hasher = Sha256::new();
    hasher.update(DOMAIN_TAG);
    hasher.update([u8::from(with_values)]);

    for (name, values) in attributes {
        write_chunk(&mut hasher, name.as_bytes());
        if with_values {
            let canonical: BTreeSet<&str> = values.iter().map(String::as_str).collect();
            hasher.update((canonical.len() as u64).to_be_bytes());
            for value in canonical {
                write_chunk(&mut hasher, value.as_bytes());
            }
        }
    }

    hasher.finalize().into()
}

fn write_chunk(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_be_bytes());
    hasher.update(bytes);
}
