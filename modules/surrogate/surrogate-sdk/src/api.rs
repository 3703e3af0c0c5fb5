//! Collaborator traits consulted by the surrogate resolver.

use async_trait::async_trait;
use sso_security::{Attributes, Principal, RegisteredService};

use crate::error::SurrogateError;

/// Decides whether an authenticated actor may assume another identity.
#[async_trait]
pub trait SurrogateAuthorizationClient: Send + Sync {
    /// Whether `actor` may act as `surrogate`, optionally for a specific
    /// service. `None` asks for a service-agnostic answer.
    ///
    /// # Errors
    ///
    /// `AuthorizationUnavailable` when the answer cannot be obtained.
    async fn can_act_as(
        &self,
        actor: &Principal,
        surrogate: &str,
        service: Option<&RegisteredService>,
    ) -> Result<bool, SurrogateError>;

    /// Accounts `actor` may act as. A [`WILDCARD_ACCOUNT`](crate::WILDCARD_ACCOUNT)
    /// entry means any account.
    ///
    /// # Errors
    ///
    /// `AuthorizationUnavailable` when the list cannot be obtained.
    async fn eligible_accounts(&self, actor: &Principal) -> Result<Vec<String>, SurrogateError>;
}

/// Attribute source for principals.
#[async_trait]
pub trait PrincipalAttributeRepository: Send + Sync {
    /// Attributes of `principal_id`, empty when the principal is unknown.
    ///
    /// # Errors
    ///
    /// `AttributeSourceUnavailable` when the source cannot be read.
    async fn resolve_attributes(
        &self,
        principal_id: &str,
        service: Option<&RegisteredService>,
    ) -> Result<Attributes, SurrogateError>;
}
