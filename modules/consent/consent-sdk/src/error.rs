//! Error types for the consent module.

use thiserror::Error;

/// Errors raised by a fingerprint transform.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The transform could not encode the input.
    #[error("encode failed: {0}")]
    Encode(String),

    /// The token is malformed or its signature does not verify.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The configured key is unusable.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}

/// Faults of the consent engine and its repositories.
///
/// Expected outcomes (no decision found, ownership mismatch on delete) are
/// never reported through this type.
#[derive(Debug, Error)]
pub enum ConsentError {
    /// The backing store cannot be reached.
    #[error("consent storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The fingerprint transform failed.
    #[error("consent fingerprint transform failed: {0}")]
    Cipher(#[from] CipherError),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
