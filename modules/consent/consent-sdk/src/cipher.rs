//! Transform contract for consent attribute fingerprints.

use std::fmt::Debug;

use crate::error::CipherError;

/// Reversible transform applied to fingerprint digests before they are
/// stored, so deployments can keep them plain or signed.
///
/// `encode` must be deterministic: identical input yields an identical token,
/// otherwise stored fingerprints could never be compared.
pub trait AttributeCipher: Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// # Errors
    ///
    /// `CipherError::Encode` when the input cannot be transformed.
    fn encode(&self, bytes: &[u8]) -> Result<String, CipherError>;

    /// # Errors
    ///
    /// `CipherError::Decode` when the token is malformed or fails verification.
    fn decode(&self, token: &str) -> Result<Vec<u8>, CipherError>;
}
