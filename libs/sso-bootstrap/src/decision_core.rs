//! Wiring of the decision components from configuration.

use std::sync::Arc;

use anyhow::Context;
use consent::ConsentEngine;
use static_surrogate_plugin::Service as StaticSurrogateService;
use surrogate::SurrogatePrincipalBuilder;
use ticket_validation::ValidationSpecificationFactory;

use crate::config::AppConfig;

/// The validation, consent and surrogate components, ready to serve
/// requests concurrently.
#[derive(Debug, Clone)]
pub struct DecisionCore {
    validation: ValidationSpecificationFactory,
    consent: ConsentEngine,
    surrogate: SurrogatePrincipalBuilder,
}

impl DecisionCore {
    /// Builds every component from `config`, backed by the in-memory consent
    /// repository and the static surrogate plugin.
    ///
    /// # Errors
    ///
    /// Fails on invalid proxy patterns or an unusable cipher configuration.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let validation = ValidationSpecificationFactory::from_config(&config.validation)
            .context("invalid validation configuration")?;

        let consent =
            ConsentEngine::in_memory(&config.consent).context("invalid consent configuration")?;

        let plugin = Arc::new(StaticSurrogateService::from_config(&config.surrogate_plugin));
        let surrogate = SurrogatePrincipalBuilder::from_config(&config.surrogate, plugin.clone())
            .with_attribute_repository(plugin);

        tracing::info!(
            renew = config.validation.renew,
            proxy_patterns = config.validation.allowed_proxy_patterns.len(),
            consent_enabled = config.consent.enabled,
            consent_history = config.consent.retain_history,
            cipher = ?config.consent.cipher.mode,
            surrogate_actors = config.surrogate_plugin.accounts.len(),
            "decision core initialized"
        );

        Ok(Self {
            validation,
            consent,
            surrogate,
        })
    }

    #[must_use]
    pub fn validation(&self) -> &ValidationSpecificationFactory {
        &self.validation
    }

    #[must_use]
    pub fn consent(&self) -> &ConsentEngine {
        &self.consent
    }

    #[must_use]
    pub fn surrogate(&self) -> &SurrogatePrincipalBuilder {
        &self.surrogate
    }
}
