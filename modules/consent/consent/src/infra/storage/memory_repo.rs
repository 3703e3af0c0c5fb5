//! In-memory consent repository.

use async_trait::async_trait;
use consent_sdk::{ConsentDecision, ConsentError, ConsentRepository};
use dashmap::DashMap;
use sso_security::{Authentication, RegisteredService, Service};
use uuid::Uuid;

use crate::config::ConsentConfig;

/// Decisions of a single principal.
#[derive(Debug, Default)]
struct PrincipalSlot {
    active: Vec<ConsentDecision>,
    superseded: Vec<ConsentDecision>,
}

impl PrincipalSlot {
    fn is_empty(&self) -> bool {
        self.active.is_empty() && self.superseded.is_empty()
    }
}

/// Consent decisions kept in process memory, keyed by principal.
///
/// Every write goes through the principal's map entry, which holds the shard
/// lock for the whole read-modify-write, so operations for one principal are
/// serialized while different principals proceed independently.
#[derive(Debug, Default)]
pub struct InMemoryConsentRepository {
    slots: DashMap<String, PrincipalSlot>,
    retain_history: bool,
}

impl InMemoryConsentRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository that keeps superseded decisions as history.
    #[must_use]
    pub fn with_history() -> Self {
        Self {
            slots: DashMap::new(),
            retain_history: true,
        }
    }

    /// Repository honoring `retain_history` of `config`.
    #[must_use]
    pub fn from_config(config: &ConsentConfig) -> Self {
        if config.retain_history {
            Self::with_history()
        } else {
            Self::new()
        }
    }

    fn prune(&self, principal_id: &str) {
        self.slots.remove_if(principal_id, |_, slot| slot.is_empty());
    }
}

#[async_trait]
impl ConsentRepository for InMemoryConsentRepository {
    async fn find_consent_decisions(
        &self,
        principal_id: &str,
    ) -> Result<Vec<ConsentDecision>, ConsentError> {
        Ok(self
            .slots
            .get(principal_id)
            .map(|slot| slot.active.clone())
            .unwrap_or_default())
    }

    async fn get_consent_decisions(&self) -> Result<Vec<ConsentDecision>, ConsentError> {
        Ok(self
            .slots
            .iter()
            .flat_map(|slot| slot.active.clone())
            .collect())
    }

    async fn find_consent_decision(
        &self,
        service: &Service,
        _registered_service: &RegisteredService,
        authentication: &Authentication,
    ) -> Result<Option<ConsentDecision>, ConsentError> {
        let principal_id = authentication.principal().id();
        Ok(self.slots.get(principal_id).and_then(|slot| {
            slot.active
                .iter()
                .find(|d| d.service_id() == service.id())
                .cloned()
        }))
    }

    async fn store_consent_decision(
        &self,
        decision: ConsentDecision,
    ) -> Result<bool, ConsentError> {
        let mut slot = self
            .slots
            .entry(decision.principal_id().to_owned())
            .or_default();

        if let Some(pos) = slot
            .active
            .iter()
            .position(|d| d.service_id() == decision.service_id())
        {
            let previous = slot.active.swap_remove(pos);
            tracing::debug!(
                principal_id = %decision.principal_id(),
                service_id = %decision.service_id(),
                superseded_id = %previous.id(),
                "superseding consent decision"
            );
            if self.retain_history {
                slot.superseded.push(previous);
            }
        }
        slot.active.push(decision);
        Ok(true)
    }

    async fn delete_consent_decision(
        &self,
        id: Uuid,
        principal_id: &str,
    ) -> Result<bool, ConsentError> {
        let removed = match self.slots.get_mut(principal_id) {
            Some(mut slot) => match slot.active.iter().position(|d| d.id() == id) {
                Some(pos) => {
                    slot.active.swap_remove(pos);
                    true
                }
                None => false,
            },
            None => false,
        };
        if removed {
            self.prune(principal_id);
        }
        Ok(removed)
    }

    async fn delete_consent_decisions(&self, principal_id: &str) -> Result<bool, ConsentError> {
        let removed = match self.slots.get_mut(principal_id) {
            Some(mut slot) if !slot.active.is_empty() => {
                slot.active.clear();
                true
            }
            _ => false,
        };
        if removed {
            self.prune(principal_id);
        }
        Ok(removed)
    }

    async fn consent_history(
        &self,
        principal_id: &str,
    ) -> Result<Vec<ConsentDecision>, ConsentError> {
        Ok(self
            .slots
            .get(principal_id)
            .map(|slot| slot.superseded.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use consent_sdk::{ConsentOptions, ConsentReminder};
    use sso_security::Principal;

    use super::*;

    fn decision(principal: &str, service: &str) -> ConsentDecision {
        ConsentDecision::new(
            service,
            principal,
            ConsentOptions::AttributeName,
            "fp",
            ConsentReminder::default(),
        )
    }

    fn auth(principal: &str) -> Authentication {
        Authentication::builder(Principal::named(principal)).build()
    }

    #[tokio::test]
    async fn consent_decision_stored() {
        let repo = InMemoryConsentRepository::new();
        let d = decision("casuser", "https://app");

        assert!(repo.store_consent_decision(d.clone()).await.unwrap());
        assert_eq!(repo.get_consent_decisions().await.unwrap().len(), 1);
        assert!(repo.delete_consent_decision(d.id(), "casuser").await.unwrap());
        assert!(repo.get_consent_decisions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_replaces_decision_for_same_service() {
        let repo = InMemoryConsentRepository::new();
        let first = decision("casuser", "https://app");
        let second = decision("casuser", "https://app");

        repo.store_consent_decision(first.clone()).await.unwrap();
        repo.store_consent_decision(second.clone()).await.unwrap();

        let all = repo.get_consent_decisions().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id(), second.id());
        assert!(repo.consent_history("casuser").await.unwrap().is_empty());
        assert!(!repo.delete_consent_decision(first.id(), "casuser").await.unwrap());
    }

    #[tokio::test]
    async fn history_keeps_superseded_decisions() {
        let repo = InMemoryConsentRepository::with_history();
        let first = decision("casuser", "https://app");
        let second = decision("casuser", "https://app");

        repo.store_consent_decision(first.clone()).await.unwrap();
        repo.store_consent_decision(second).await.unwrap();

        let history = repo.consent_history("casuser").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id(), first.id());
        assert_eq!(repo.get_consent_decisions().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn config_selects_history_retention() {
        let config = ConsentConfig {
            retain_history: true,
            ..ConsentConfig::default()
        };
        let repo = InMemoryConsentRepository::from_config(&config);
        repo.store_consent_decision(decision("casuser", "https://app"))
            .await
            .unwrap();
        repo.store_consent_decision(decision("casuser", "https://app"))
            .await
            .unwrap();
        assert_eq!(repo.consent_history("casuser").await.unwrap().len(), 1);

        let repo = InMemoryConsentRepository::from_config(&ConsentConfig::default());
        repo.store_consent_decision(decision("casuser", "https://app"))
            .await
            .unwrap();
        repo.store_consent_decision(decision("casuser", "https://app"))
            .await
            .unwrap();
        assert!(repo.consent_history("casuser").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_is_scoped_to_principal_and_service() {
        let repo = InMemoryConsentRepository::new();
        repo.store_consent_decision(decision("alice", "https://a"))
            .await
            .unwrap();
        repo.store_consent_decision(decision("bob", "https://b"))
            .await
            .unwrap();

        let rs = RegisteredService::default();
        let found = repo
            .find_consent_decision(&Service::new("https://a"), &rs, &auth("alice"))
            .await
            .unwrap();
        assert_eq!(found.unwrap().principal_id(), "alice");

        assert!(
            repo.find_consent_decision(&Service::new("https://b"), &rs, &auth("alice"))
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(repo.find_consent_decisions("bob").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_requires_ownership() {
        let repo = InMemoryConsentRepository::new();
        let d = decision("casuser", "https://app");
        repo.store_consent_decision(d.clone()).await.unwrap();

        assert!(!repo.delete_consent_decision(d.id(), "otherUser").await.unwrap());
        assert_eq!(repo.find_consent_decisions("casuser").await.unwrap().len(), 1);
        assert!(!repo.delete_consent_decision(Uuid::new_v4(), "casuser").await.unwrap());
    }

    #[tokio::test]
    async fn delete_all_for_principal() {
        let repo = InMemoryConsentRepository::new();
        repo.store_consent_decision(decision("casuser", "https://a"))
            .await
            .unwrap();
        repo.store_consent_decision(decision("casuser", "https://b"))
            .await
            .unwrap();
        repo.store_consent_decision(decision("other", "https://a"))
            .await
            .unwrap();

        assert!(repo.delete_consent_decisions("casuser").await.unwrap());
        assert!(!repo.delete_consent_decisions("casuser").await.unwrap());
        assert_eq!(repo.get_consent_decisions().await.unwrap().len(), 1);
    }
}
