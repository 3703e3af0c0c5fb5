//! Domain models for the surrogate module.

use serde::{Deserialize, Serialize};
use sso_security::{AuthenticationResultBuilder, Principal};

use crate::error::SurrogateError;

/// Authentication attribute set to `"true"` on a substituted authentication.
pub const SURROGATE_ENABLED_ATTRIBUTE: &str = "surrogateEnabled";

/// Authentication attribute naming the acting (primary) principal.
pub const SURROGATE_PRINCIPAL_ATTRIBUTE: &str = "surrogatePrincipal";

/// Authentication attribute naming the assumed (surrogate) principal.
pub const SURROGATE_USER_ATTRIBUTE: &str = "surrogateUser";

/// Eligible-account entry granting impersonation of any account.
pub const WILDCARD_ACCOUNT: &str = "*";

/// A credential asking to act as another user, such as `jdoe+casuser`
/// (surrogate `jdoe`, presented by `casuser`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurrogateCredential {
    username: String,
    surrogate_username: String,
}

impl SurrogateCredential {
    #[must_use]
    pub fn new(username: impl Into<String>, surrogate_username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            surrogate_username: surrogate_username.into(),
        }
    }

    /// Splits `surrogate<separator>actor` at the first separator.
    ///
    /// # Errors
    ///
    /// `InvalidCredential` when the separator is missing or either side is
    /// empty.
    pub fn parse(input: &str, separator: char) -> Result<Self, SurrogateError> {
        let Some((surrogate, actor)) = input.split_once(separator) else {
            return Err(SurrogateError::InvalidCredential(format!(
                "missing '{separator}' separator"
            )));
        };
        if surrogate.is_empty() || actor.is_empty() {
            return Err(SurrogateError::InvalidCredential(
                "surrogate and actor must both be named".to_owned(),
            ));
        }
        Ok(Self::new(actor, surrogate))
    }

    /// The authenticating (acting) user.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The identity the actor asks to assume.
    #[must_use]
    pub fn surrogate_username(&self) -> &str {
        &self.surrogate_username
    }
}

/// The assumed identity together with the actor behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurrogatePrincipal {
    primary: Principal,
    surrogate: Principal,
}

impl SurrogatePrincipal {
    #[must_use]
    pub fn new(primary: Principal, surrogate: Principal) -> Self {
        Self { primary, surrogate }
    }

    #[must_use]
    pub fn primary(&self) -> &Principal {
        &self.primary
    }

    #[must_use]
    pub fn surrogate(&self) -> &Principal {
        &self.surrogate
    }

    #[must_use]
    pub fn into_surrogate(self) -> Principal {
        self.surrogate
    }
}

/// An authentication transaction whose subject has been substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurrogateAuthenticationResult {
    builder: AuthenticationResultBuilder,
    primary_principal_id: String,
    surrogate_principal_id: String,
}

impl SurrogateAuthenticationResult {
    #[must_use]
    pub fn new(
        builder: AuthenticationResultBuilder,
        primary_principal_id: impl Into<String>,
        surrogate_principal_id: impl Into<String>,
    ) -> Self {
        Self {
            builder,
            primary_principal_id: primary_principal_id.into(),
            surrogate_principal_id: surrogate_principal_id.into(),
        }
    }

    #[must_use]
    pub fn builder(&self) -> &AuthenticationResultBuilder {
        &self.builder
    }

    #[must_use]
    pub fn into_builder(self) -> AuthenticationResultBuilder {
        self.builder
    }

    /// The acting principal.
    #[must_use]
    pub fn primary_principal_id(&self) -> &str {
        &self.primary_principal_id
    }

    #[must_use]
    pub fn surrogate_principal_id(&self) -> &str {
        &self.surrogate_principal_id
    }
}
