//! Builds the specification chain for a validation endpoint.

use std::sync::Arc;

use crate::config::ValidationConfig;

use super::error::ValidationConfigError;
use super::protocol::{ProxyingAllowed, RenewOnly, WithoutProxying};
use super::proxy::{ProxyAuthorization, RegexProxyAuthorization};
use super::specification::{ValidationRequest, ValidationSpecificationChain};

/// Validation endpoints and the constraints they apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationEndpoint {
    /// Service ticket validation; proxy tickets are refused.
    ServiceValidate,
    /// Service or proxy ticket validation.
    ProxyValidate,
    /// Legacy plain-text validation, renew enforcement only.
    LegacyValidate,
}

/// Creates per-request specification chains.
///
/// `renew` is resolved once per request (configured default OR the request
/// flag) and baked into freshly built specifications, so nothing shared is
/// ever mutated.
#[derive(Debug, Clone)]
pub struct ValidationSpecificationFactory {
    renew: bool,
    proxy_authorization: Arc<dyn ProxyAuthorization>,
}

impl ValidationSpecificationFactory {
    /// # Errors
    ///
    /// Returns `InvalidProxyPattern` when a configured proxy pattern does not
    /// compile.
    pub fn from_config(cfg: &ValidationConfig) -> Result<Self, ValidationConfigError> {
        let authorization = RegexProxyAuthorization::new(&cfg.allowed_proxy_patterns)?;
        Ok(Self::new(cfg.renew, Arc::new(authorization)))
    }

    #[must_use]
    pub fn new(renew: bool, proxy_authorization: Arc<dyn ProxyAuthorization>) -> Self {
        Self {
            renew,
            proxy_authorization,
        }
    }

    #[must_use]
    pub fn for_endpoint(
        &self,
        endpoint: ValidationEndpoint,
        request: &ValidationRequest,
    ) -> ValidationSpecificationChain {
        let renew = self.renew || request.renew;
        let chain = ValidationSpecificationChain::new();
        match endpoint {
            ValidationEndpoint::ServiceValidate => chain.with(WithoutProxying::new(renew)),
            ValidationEndpoint::ProxyValidate => chain.with(ProxyingAllowed::new(
                renew,
                Arc::clone(&self.proxy_authorization),
            )),
            ValidationEndpoint::LegacyValidate => chain.with(RenewOnly::new(renew)),
        }
    }
}
