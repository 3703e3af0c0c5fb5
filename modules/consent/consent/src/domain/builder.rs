//! Builds consent decisions from a live authentication context.

use consent_sdk::{CipherError, ConsentDecision, ConsentOptions, ConsentReminder};
use sso_security::{Attributes, RegisteredService, Service};

use super::fingerprint::AttributeFingerprinter;

/// Builds [`ConsentDecision`]s. Never touches storage.
#[derive(Debug, Clone)]
pub struct ConsentDecisionBuilder {
    fingerprinter: AttributeFingerprinter,
    default_options: ConsentOptions,
    default_reminder: ConsentReminder,
}

impl ConsentDecisionBuilder {
    #[must_use]
    pub fn new(fingerprinter: AttributeFingerprinter) -> Self {
        Self {
            fingerprinter,
            default_options: ConsentOptions::default(),
            default_reminder: ConsentReminder::default(),
        }
    }

    #[must_use]
    pub fn with_defaults(mut self, options: ConsentOptions, reminder: ConsentReminder) -> Self {
        self.default_options = options;
        self.default_reminder = reminder;
        self
    }

    #[must_use]
    pub fn fingerprinter(&self) -> &AttributeFingerprinter {
        &self.fingerprinter
    }

    /// Builds a decision with the default options and reminder.
    ///
    /// # Errors
    ///
    /// Propagates a failure of the fingerprint transform.
    pub fn build(
        &self,
        service: &Service,
        registered_service: &RegisteredService,
        principal_id: &str,
        attributes: &Attributes,
    ) -> Result<ConsentDecision, CipherError> {
        self.build_with(
            service,
            registered_service,
            principal_id,
            attributes,
            self.default_options,
            self.default_reminder,
        )
    }

    /// Builds a decision with explicit options and reminder.
    ///
    /// # Errors
    ///
    /// Propagates a failure of the fingerprint transform.
    pub fn build_with(
        &self,
        service: &Service,
        _registered_service: &RegisteredService,
        principal_id: &str,
        attributes: &Attributes,
        options: ConsentOptions,
        reminder: ConsentReminder,
    ) -> Result<ConsentDecision, CipherError> {
        let fingerprint = self.fingerprinter.fingerprint(attributes, options)?;
        Ok(ConsentDecision::new(
            service.id(),
            principal_id,
            options,
            fingerprint,
            reminder,
        ))
    }

    /// Whether `attributes` differ from what `decision` was given for, at the
    /// decision's own granularity.
    ///
    /// # Errors
    ///
    /// Propagates a failure of the fingerprint transform.
    pub fn attributes_changed(
        &self,
        decision: &ConsentDecision,
        attributes: &Attributes,
    ) -> Result<bool, CipherError> {
        let fresh = self.fingerprinter.fingerprint(attributes, decision.options())?;
        Ok(fresh != decision.attributes_fingerprint())
    }
}
