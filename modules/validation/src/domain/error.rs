//! Errors raised while building validation specifications.

/// Configuration errors. Evaluating a specification never fails.
#[derive(thiserror::Error, Debug)]
pub enum ValidationConfigError {
    #[error("invalid proxy pattern '{pattern}': {reason}")]
    InvalidProxyPattern { pattern: String, reason: String },
}
