use consent_sdk::{AttributeCipher, CipherError};

/// Stores fingerprints as lowercase hex.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCipher;

impl AttributeCipher for PlainCipher {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn encode(&self, bytes: &[u8]) -> Result<String, CipherError> {
        Ok(hex::encode(bytes))
    }

    fn decode(&self, token: &str) -> Result<Vec<u8>, CipherError> {
        hex::decode(token).map_err(|e| CipherError::Decode(e.to_string()))
    }
}
