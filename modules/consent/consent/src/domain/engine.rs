//! Consent-required decision and consent decision lifecycle.

use std::sync::Arc;

use consent_sdk::{
    ConsentDecision, ConsentError, ConsentOptions, ConsentReminder, ConsentRepository,
};
use sso_security::{Attributes, Authentication, RegisteredService, Service};
use time::OffsetDateTime;
use uuid::Uuid;

use super::builder::ConsentDecisionBuilder;
use super::fingerprint::AttributeFingerprinter;
use crate::config::ConsentConfig;
use crate::infra::cipher::build_cipher;
use crate::infra::storage::InMemoryConsentRepository;

/// Why the user has to be asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentRequiredReason {
    NoDecision,
    AlwaysPrompt,
    ReminderElapsed,
    AttributesChanged,
}

/// Outcome of [`ConsentEngine::is_consent_required`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsentRequirement {
    /// Consent is switched off globally or for the service.
    Disabled,
    /// A stored decision still covers the release.
    NotRequired(ConsentDecision),
    /// The user must confirm the release of `attributes`.
    Required {
        reason: ConsentRequiredReason,
        decision: Option<ConsentDecision>,
        attributes: Attributes,
    },
}

impl ConsentRequirement {
    #[must_use]
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Required { .. })
    }
}

/// Facade combining the decision builder and a repository.
#[derive(Clone)]
pub struct ConsentEngine {
    repository: Arc<dyn ConsentRepository>,
    builder: ConsentDecisionBuilder,
    enabled: bool,
}

impl std::fmt::Debug for ConsentEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsentEngine")
            .field("builder", &self.builder)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl ConsentEngine {
    #[must_use]
    pub fn new(repository: Arc<dyn ConsentRepository>, builder: ConsentDecisionBuilder) -> Self {
        Self {
            repository,
            builder,
            enabled: true,
        }
    }

    /// Builds an engine from configuration on top of `repository`.
    ///
    /// `retain_history` is a property of the repository and is not applied
    /// here; [`Self::in_memory`] honors it.
    ///
    /// # Errors
    ///
    /// Fails when the configured cipher cannot be built.
    pub fn from_config(
        config: &ConsentConfig,
        repository: Arc<dyn ConsentRepository>,
    ) -> Result<Self, ConsentError> {
        let cipher = build_cipher(&config.cipher)?;
        let builder = ConsentDecisionBuilder::new(AttributeFingerprinter::new(cipher))
            .with_defaults(config.default_options, config.reminder);
        Ok(Self {
            repository,
            builder,
            enabled: config.enabled,
        })
    }

    /// Builds an engine from configuration backed by an
    /// [`InMemoryConsentRepository`] that keeps history when `retain_history`
    /// is set.
    ///
    /// # Errors
    ///
    /// Fails when the configured cipher cannot be built.
    pub fn in_memory(config: &ConsentConfig) -> Result<Self, ConsentError> {
        let repository = Arc::new(InMemoryConsentRepository::from_config(config));
        Self::from_config(config, repository)
    }

    #[must_use]
    pub fn builder(&self) -> &ConsentDecisionBuilder {
        &self.builder
    }

    #[must_use]
    pub fn repository(&self) -> &Arc<dyn ConsentRepository> {
        &self.repository
    }

    /// Principal attributes released to the service and subject to consent.
    #[must_use]
    pub fn consentable_attributes(
        &self,
        authentication: &Authentication,
        registered_service: &RegisteredService,
    ) -> Attributes {
        let released = registered_service
            .attribute_release_policy
            .release(authentication.principal().attributes());
        registered_service.consent_policy.consentable(&released)
    }

    /// Whether the user must be asked before releasing attributes now.
    ///
    /// # Errors
    ///
    /// Propagates repository and fingerprint transform failures.
    pub async fn is_consent_required(
        &self,
        service: &Service,
        registered_service: &RegisteredService,
        authentication: &Authentication,
    ) -> Result<ConsentRequirement, ConsentError> {
        self.is_consent_required_at(
            service,
            registered_service,
            authentication,
            OffsetDateTime::now_utc(),
        )
        .await
    }

    /// [`Self::is_consent_required`] evaluated at `now`.
    ///
    /// # Errors
    ///
    /// Propagates repository and fingerprint transform failures.
    #[tracing::instrument(skip_all, fields(
        service_id = %service.id(),
        principal_id = %authentication.principal().id(),
    ))]
    pub async fn is_consent_required_at(
        &self,
        service: &Service,
        registered_service: &RegisteredService,
        authentication: &Authentication,
        now: OffsetDateTime,
    ) -> Result<ConsentRequirement, ConsentError> {
        if !self.enabled || !registered_service.consent_policy.enabled {
            tracing::debug!("consent disabled");
            return Ok(ConsentRequirement::Disabled);
        }

        let attributes = self.consentable_attributes(authentication, registered_service);
        let decision = self
            .repository
            .find_consent_decision(service, registered_service, authentication)
            .await?;

        let Some(decision) = decision else {
            tracing::debug!(reason = ?ConsentRequiredReason::NoDecision, "consent required");
            return Ok(ConsentRequirement::Required {
                reason: ConsentRequiredReason::NoDecision,
                decision: None,
                attributes,
            });
        };

        let reason = if decision.options() == ConsentOptions::Always {
            Some(ConsentRequiredReason::AlwaysPrompt)
        } else if decision.is_reminder_elapsed(now) {
            Some(ConsentRequiredReason::ReminderElapsed)
        } else if self.builder.attributes_changed(&decision, &attributes)? {
            Some(ConsentRequiredReason::AttributesChanged)
        } else {
            None
        };

        Ok(match reason {
            Some(reason) => {
                tracing::debug!(?reason, "consent required");
                ConsentRequirement::Required {
                    reason,
                    decision: Some(decision),
                    attributes,
                }
            }
            None => ConsentRequirement::NotRequired(decision),
        })
    }

    /// Records the user's consent as a new decision replacing any previous
    /// one for the same service.
    ///
    /// # Errors
    ///
    /// Propagates repository and fingerprint transform failures, and reports
    /// `Internal` when the repository refuses the write.
    #[tracing::instrument(skip_all, fields(
        service_id = %service.id(),
        principal_id = %authentication.principal().id(),
    ))]
    pub async fn store_consent_decision(
        &self,
        service: &Service,
        registered_service: &RegisteredService,
        authentication: &Authentication,
        reminder: ConsentReminder,
        options: ConsentOptions,
    ) -> Result<ConsentDecision, ConsentError> {
        let attributes = self.consentable_attributes(authentication, registered_service);
        let decision = self.builder.build_with(
            service,
            registered_service,
            authentication.principal().id(),
            &attributes,
            options,
            reminder,
        )?;

        if !self
            .repository
            .store_consent_decision(decision.clone())
            .await?
        {
            tracing::error!("repository refused consent decision");
            return Err(ConsentError::Internal(
                "consent decision was not stored".to_owned(),
            ));
        }

        tracing::info!(decision_id = %decision.id(), ?options, "consent decision stored");
        Ok(decision)
    }

    /// Active decision of the authenticated principal for `service`.
    ///
    /// # Errors
    ///
    /// Propagates repository failures.
    pub async fn find_consent_decision(
        &self,
        service: &Service,
        registered_service: &RegisteredService,
        authentication: &Authentication,
    ) -> Result<Option<ConsentDecision>, ConsentError> {
        self.repository
            .find_consent_decision(service, registered_service, authentication)
            .await
    }

    /// Active decisions of `principal_id`.
    ///
    /// # Errors
    ///
    /// Propagates repository failures.
    pub async fn consent_decisions_for(
        &self,
        principal_id: &str,
    ) -> Result<Vec<ConsentDecision>, ConsentError> {
        self.repository.find_consent_decisions(principal_id).await
    }

    /// Revokes one decision owned by `principal_id`.
    ///
    /// # Errors
    ///
    /// Propagates repository failures.
    #[tracing::instrument(skip_all, fields(principal_id = %principal_id, decision_id = %id))]
    pub async fn delete_consent_decision(
        &self,
        id: Uuid,
        principal_id: &str,
    ) -> Result<bool, ConsentError> {
        let deleted = self
            .repository
            .delete_consent_decision(id, principal_id)
            .await?;
        if deleted {
            tracing::info!("consent decision deleted");
        }
        Ok(deleted)
    }

    /// Revokes every decision of `principal_id`.
    ///
    /// # Errors
    ///
    /// Propagates repository failures.
    pub async fn delete_consent_decisions(&self, principal_id: &str) -> Result<bool, ConsentError> {
        let deleted = self.repository.delete_consent_decisions(principal_id).await?;
        if deleted {
            tracing::info!(principal_id, "consent decisions deleted");
        }
        Ok(deleted)
    }

    /// Decisions of `principal_id` superseded by later ones, oldest first.
    ///
    /// # Errors
    ///
    /// Propagates repository failures.
    pub async fn consent_history(
        &self,
        principal_id: &str,
    ) -> Result<Vec<ConsentDecision>, ConsentError> {
        self.repository.consent_history(principal_id).await
    }
}
