//! Surrogate principal construction and authentication substitution.

use std::sync::Arc;

use sso_security::{
    Attributes, Authentication, AuthenticationResultBuilder, Principal, RegisteredService,
    SurrogatePolicy,
};
use surrogate_sdk::{
    PrincipalAttributeRepository, SURROGATE_ENABLED_ATTRIBUTE, SURROGATE_PRINCIPAL_ATTRIBUTE,
    SURROGATE_USER_ATTRIBUTE, SurrogateAuthenticationResult, SurrogateAuthorizationClient,
    SurrogateCredential, SurrogateError,
};

use super::merger::AttributeMerger;
use crate::config::SurrogateConfig;

/// Builds surrogate principals and swaps them into authentication
/// transactions.
///
/// Holds no mutable state; a single instance serves concurrent requests.
#[derive(Clone)]
pub struct SurrogatePrincipalBuilder {
    authorization: Arc<dyn SurrogateAuthorizationClient>,
    attribute_repositories: Vec<Arc<dyn PrincipalAttributeRepository>>,
    merger: AttributeMerger,
    separator: char,
}

impl std::fmt::Debug for SurrogatePrincipalBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurrogatePrincipalBuilder")
            .field("attribute_repositories", &self.attribute_repositories.len())
            .field("merger", &self.merger)
            .field("separator", &self.separator)
            .finish_non_exhaustive()
    }
}

impl SurrogatePrincipalBuilder {
    #[must_use]
    pub fn new(authorization: Arc<dyn SurrogateAuthorizationClient>) -> Self {
        Self {
            authorization,
            attribute_repositories: Vec::new(),
            merger: AttributeMerger::default(),
            separator: '+',
        }
    }

    #[must_use]
    pub fn from_config(
        config: &SurrogateConfig,
        authorization: Arc<dyn SurrogateAuthorizationClient>,
    ) -> Self {
        Self {
            merger: config.merger,
            separator: config.separator,
            ..Self::new(authorization)
        }
    }

    /// Adds an attribute source. Sources are consulted in insertion order.
    #[must_use]
    pub fn with_attribute_repository(
        mut self,
        repository: Arc<dyn PrincipalAttributeRepository>,
    ) -> Self {
        self.attribute_repositories.push(repository);
        self
    }

    #[must_use]
    pub fn with_merger(mut self, merger: AttributeMerger) -> Self {
        self.merger = merger;
        self
    }

    /// Parses a `surrogate<separator>actor` username with the configured
    /// separator.
    ///
    /// # Errors
    ///
    /// `InvalidCredential` when the input does not name both users.
    pub fn parse_credential(&self, input: &str) -> Result<SurrogateCredential, SurrogateError> {
        SurrogateCredential::parse(input, self.separator)
    }

    /// Builds the principal for `surrogate_id`.
    ///
    /// Attributes come from the configured sources only; nothing is copied
    /// from `primary`.
    ///
    /// # Errors
    ///
    /// Propagates attribute source failures.
    pub async fn build_surrogate_principal(
        &self,
        surrogate_id: &str,
        primary: &Principal,
        registered_service: Option<&RegisteredService>,
    ) -> Result<Principal, SurrogateError> {
        let principal = self.resolve_principal(surrogate_id, registered_service).await?;
        tracing::debug!(
            primary = %primary.id(),
            surrogate = %surrogate_id,
            attributes = principal.attributes().len(),
            "built surrogate principal"
        );
        Ok(principal)
    }

    async fn resolve_principal(
        &self,
        principal_id: &str,
        registered_service: Option<&RegisteredService>,
    ) -> Result<Principal, SurrogateError> {
        let mut attributes = Attributes::new();
        for repository in &self.attribute_repositories {
            let resolved = repository
                .resolve_attributes(principal_id, registered_service)
                .await?;
            attributes = self.merger.merge(attributes, resolved);
        }
        Ok(Principal::new(principal_id, attributes))
    }

    /// Substitutes the initial authentication of `builder` with one for the
    /// credential's surrogate.
    ///
    /// Returns `Ok(None)` when the authenticated principal is not the
    /// credential's actor, when the service policy or the authorization
    /// source denies the impersonation, or when the transaction already
    /// carries a different surrogate. A transaction already substituted for
    /// the same actor and surrogate is returned unchanged once the actor,
    /// resolved through the attribute sources, passes the same checks for
    /// `registered_service`.
    ///
    /// # Errors
    ///
    /// `MissingAuthentication` when nothing was collected yet; attribute
    /// source failures are propagated.
    #[tracing::instrument(skip_all, fields(
        actor = %credential.username(),
        surrogate = %credential.surrogate_username(),
    ))]
    pub async fn build_surrogate_authentication_result(
        &self,
        builder: AuthenticationResultBuilder,
        credential: &SurrogateCredential,
        registered_service: Option<&RegisteredService>,
    ) -> Result<Option<SurrogateAuthenticationResult>, SurrogateError> {
        let Some(initial) = builder.initial_authentication() else {
            return Err(SurrogateError::MissingAuthentication);
        };
        let surrogate_id = credential.surrogate_username();

        let marker = surrogate_marker(initial);
        let already_substituted = marker.is_some();
        let actor = match marker {
            Some(marked) if marked.surrogate != surrogate_id => {
                tracing::warn!(
                    current = %marked.surrogate,
                    "refusing to substitute an already substituted transaction"
                );
                return Ok(None);
            }
            Some(marked) => self.resolve_principal(marked.actor, registered_service).await?,
            None => initial.principal().clone(),
        };

        if actor.id() != credential.username() {
            tracing::warn!(
                authenticated = %actor.id(),
                "credential names a different actor than the transaction"
            );
            return Ok(None);
        }

        if !self.is_authorized(&actor, surrogate_id, registered_service).await {
            return Ok(None);
        }

        if already_substituted {
            tracing::debug!("transaction already substituted");
            return Ok(Some(SurrogateAuthenticationResult::new(
                builder,
                actor.id(),
                surrogate_id,
            )));
        }

        let surrogate = self
            .build_surrogate_principal(surrogate_id, &actor, registered_service)
            .await?;

        let substituted = initial
            .to_builder()
            .principal(surrogate)
            .attribute(SURROGATE_ENABLED_ATTRIBUTE, vec!["true".to_owned()])
            .attribute(SURROGATE_PRINCIPAL_ATTRIBUTE, vec![actor.id().to_owned()])
            .attribute(SURROGATE_USER_ATTRIBUTE, vec![surrogate_id.to_owned()])
            .build();

        tracing::info!("surrogate session granted");
        Ok(Some(SurrogateAuthenticationResult::new(
            builder.replace_initial_authentication(substituted),
            actor.id(),
            surrogate_id,
        )))
    }

    /// Service policy first, then the authorization source. A failed lookup
    /// counts as a denial.
    async fn is_authorized(
        &self,
        actor: &Principal,
        surrogate_id: &str,
        registered_service: Option<&RegisteredService>,
    ) -> bool {
        let permitted = match registered_service {
            Some(rs) => rs.surrogate_policy.permits(actor),
            None => SurrogatePolicy::default().permits(actor),
        };
        if !permitted {
            tracing::warn!("surrogate policy of the service denies impersonation");
            return false;
        }

        match self
            .authorization
            .can_act_as(actor, surrogate_id, registered_service)
            .await
        {
            Ok(true) => true,
            Ok(false) => {
                tracing::warn!("actor is not authorized to impersonate surrogate");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "surrogate authorization lookup failed");
                false
            }
        }
    }
}

struct SurrogateMarker<'a> {
    actor: &'a str,
    surrogate: &'a str,
}

fn surrogate_marker(authentication: &Authentication) -> Option<SurrogateMarker<'_>> {
    let attributes = authentication.attributes();
    if attributes.first(SURROGATE_ENABLED_ATTRIBUTE) != Some("true") {
        return None;
    }
    Some(SurrogateMarker {
        actor: attributes.first(SURROGATE_PRINCIPAL_ATTRIBUTE)?,
        surrogate: attributes.first(SURROGATE_USER_ATTRIBUTE)?,
    })
}
