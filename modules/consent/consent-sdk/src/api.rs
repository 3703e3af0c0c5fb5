//! Storage trait for consent decisions.
//!
//! The consent engine talks to storage only through this trait, so decisions
//! can live in memory or in any external store.

use async_trait::async_trait;
use sso_security::{Authentication, RegisteredService, Service};
use uuid::Uuid;

use crate::error::ConsentError;
use crate::models::ConsentDecision;

/// Repository of consent decisions.
///
/// Holds at most one active decision per (principal, service) pair. Writes for
/// the same principal are serialized: a concurrent store and delete leave the
/// repository in one of the two complete end states.
#[async_trait]
pub trait ConsentRepository: Send + Sync {
    /// Active decisions of one principal.
    ///
    /// # Errors
    ///
    /// `StorageUnavailable` when the backing store cannot be read.
    async fn find_consent_decisions(
        &self,
        principal_id: &str,
    ) -> Result<Vec<ConsentDecision>, ConsentError>;

    /// All active decisions, in no particular order.
    ///
    /// # Errors
    ///
    /// `StorageUnavailable` when the backing store cannot be read.
    async fn get_consent_decisions(&self) -> Result<Vec<ConsentDecision>, ConsentError>;

    /// The active decision of the authenticated principal for `service`.
    ///
    /// `Ok(None)` means the principal never consented for this service.
    ///
    /// # Errors
    ///
    /// `StorageUnavailable` when the backing store cannot be read.
    async fn find_consent_decision(
        &self,
        service: &Service,
        registered_service: &RegisteredService,
        authentication: &Authentication,
    ) -> Result<Option<ConsentDecision>, ConsentError>;

    /// Inserts the decision, superseding any active decision for the same
    /// principal and service. Returns `true` once stored.
    ///
    /// # Errors
    ///
    /// `StorageUnavailable` when the backing store cannot be written.
    async fn store_consent_decision(&self, decision: ConsentDecision)
    -> Result<bool, ConsentError>;

    /// Deletes decision `id` only if it belongs to `principal_id`.
    ///
    /// Returns `false`, not an error, when no such decision exists or it is
    /// owned by another principal.
    ///
    /// # Errors
    ///
    /// `StorageUnavailable` when the backing store cannot be written.
    async fn delete_consent_decision(
        &self,
        id: Uuid,
        principal_id: &str,
    ) -> Result<bool, ConsentError>;

    /// Deletes every active decision of `principal_id`. Returns whether
    /// anything was removed.
    ///
    /// # Errors
    ///
    /// `StorageUnavailable` when the backing store cannot be written.
    async fn delete_consent_decisions(&self, principal_id: &str) -> Result<bool, ConsentError>;

    /// Superseded decisions of a principal, oldest first. Repositories that
    /// do not keep history return an empty list.
    ///
    /// # Errors
    ///
    /// `StorageUnavailable` when the backing store cannot be read.
    async fn consent_history(
        &self,
        _principal_id: &str,
    ) -> Result<Vec<ConsentDecision>, ConsentError> {
        Ok(Vec::new())
    }
}
