//! Collaborator trait implementations for the static surrogate plugin.

use async_trait::async_trait;
use sso_security::{Attributes, Principal, RegisteredService};
use surrogate_sdk::{PrincipalAttributeRepository, SurrogateAuthorizationClient, SurrogateError};

use super::service::Service;

#[async_trait]
impl SurrogateAuthorizationClient for Service {
    async fn can_act_as(
        &self,
        actor: &Principal,
        surrogate: &str,
        _service: Option<&RegisteredService>,
    ) -> Result<bool, SurrogateError> {
        let allowed = self.is_allowed(actor.id(), surrogate);
        tracing::debug!(actor = %actor.id(), surrogate, allowed, "static surrogate lookup");
        Ok(allowed)
    }

    async fn eligible_accounts(&self, actor: &Principal) -> Result<Vec<String>, SurrogateError> {
        Ok(Service::eligible_accounts(self, actor.id()))
    }
}

#[async_trait]
impl PrincipalAttributeRepository for Service {
    async fn resolve_attributes(
        &self,
        principal_id: &str,
        _service: Option<&RegisteredService>,
    ) -> Result<Attributes, SurrogateError> {
        Ok(self.attributes_of(principal_id))
    }
}
