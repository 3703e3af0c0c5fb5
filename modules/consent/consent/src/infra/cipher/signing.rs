use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use consent_sdk::{AttributeCipher, CipherError};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

const MIN_KEY_LEN: usize = 32;

#[derive(Serialize, Deserialize)]
struct FingerprintClaims {
    fp: String,
}

/// Wraps fingerprints in an HS512-signed JWS.
///
/// The token carries no timestamps, so signing the same digest twice yields
/// the same token. Decoding verifies the signature before returning the
/// digest.
pub struct SigningCipher {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl SigningCipher {
    /// # Errors
    ///
    /// `InvalidKey` when the key is shorter than 32 bytes.
    pub fn new(key: &SecretString) -> Result<Self, CipherError> {
        let secret = key.expose_secret().as_bytes();
        if secret.len() < MIN_KEY_LEN {
            return Err(CipherError::InvalidKey(format!(
                "signing key must be at least {MIN_KEY_LEN} bytes"
            )));
        }

        let mut validation = Validation::new(Algorithm::HS512);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        })
    }
}

impl fmt::Debug for SigningCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningCipher")
            .field("algorithm", &Algorithm::HS512)
            .finish_non_exhaustive()
    }
}

impl AttributeCipher for SigningCipher {
    fn name(&self) -> &'static str {
        "signed"
    }

    fn encode(&self, bytes: &[u8]) -> Result<String, CipherError> {
        let claims = FingerprintClaims {
            fp: URL_SAFE_NO_PAD.encode(bytes),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS512), &claims, &self.encoding)
            .map_err(|e| CipherError::Encode(e.to_string()))
    }

    fn decode(&self, token: &str) -> Result<Vec<u8>, CipherError> {
        let data = jsonwebtoken::decode::<FingerprintClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| CipherError::Decode(e.to_string()))?;
        URL_SAFE_NO_PAD
            .decode(data.claims.fp)
            .map_err(|e| CipherError::Decode(e.to_string()))
    }
}
