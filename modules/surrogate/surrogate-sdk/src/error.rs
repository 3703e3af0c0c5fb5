//! Error types for the surrogate module.

use thiserror::Error;

/// Errors raised while resolving a surrogate identity.
///
/// A denied impersonation is not an error: it is reported as an absent
/// result by the resolver.
#[derive(Debug, Error)]
pub enum SurrogateError {
    /// The credential does not name both a surrogate and an actor.
    #[error("invalid surrogate credential: {0}")]
    InvalidCredential(String),

    /// The authorization source could not be consulted.
    #[error("surrogate authorization unavailable: {0}")]
    AuthorizationUnavailable(String),

    /// An attribute source could not be consulted.
    #[error("attribute source unavailable: {0}")]
    AttributeSourceUnavailable(String),

    /// The authentication transaction has no initial authentication.
    #[error("no initial authentication to substitute")]
    MissingAuthentication,

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
