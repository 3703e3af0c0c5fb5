//! Protocol validation specifications.

use std::sync::Arc;

use sso_security::Assertion;

use super::proxy::ProxyAuthorization;
use super::specification::{ValidationRequest, ValidationSpecification};

fn renew_satisfied(renew: bool, assertion: &Assertion) -> bool {
    !renew || assertion.is_from_new_login()
}

/// Rejects any assertion obtained through a proxy.
///
/// With `renew` set, the assertion must also come from a fresh login.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WithoutProxying {
    renew: bool,
}

impl WithoutProxying {
    #[must_use]
    pub fn new(renew: bool) -> Self {
        Self { renew }
    }

    #[must_use]
    pub fn is_renew(&self) -> bool {
        self.renew
    }
}

impl ValidationSpecification for WithoutProxying {
    fn is_satisfied_by(&self, assertion: &Assertion, _request: &ValidationRequest) -> bool {
        assertion.chained_authentications().len() == 1 && renew_satisfied(self.renew, assertion)
    }
}

/// Accepts proxied assertions when every proxy hop targets a service that is
/// authorized to proxy.
///
/// A hop's target service is the principal of its authentication, i.e. the
/// proxy callback URL the proxy-granting ticket was issued to.
#[derive(Debug, Clone)]
pub struct ProxyingAllowed {
    renew: bool,
    authorization: Arc<dyn ProxyAuthorization>,
}

impl ProxyingAllowed {
    #[must_use]
    pub fn new(renew: bool, authorization: Arc<dyn ProxyAuthorization>) -> Self {
        Self {
            renew,
            authorization,
        }
    }

    #[must_use]
    pub fn is_renew(&self) -> bool {
        self.renew
    }
}

impl ValidationSpecification for ProxyingAllowed {
    fn is_satisfied_by(&self, assertion: &Assertion, _request: &ValidationRequest) -> bool {
        if !renew_satisfied(self.renew, assertion) {
            return false;
        }
        assertion.proxy_hops().iter().all(|hop| {
            let proxy = hop.principal().id();
            let allowed = self.authorization.is_allowed_to_proxy(proxy);
            if !allowed {
                tracing::debug!(proxy, "proxy hop targets a service not authorized to proxy");
            }
            allowed
        })
    }
}

/// Enforces only the renew rule; proxying is not considered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenewOnly {
    renew: bool,
}

impl RenewOnly {
    #[must_use]
    pub fn new(renew: bool) -> Self {
        Self { renew }
    }

    #[must_use]
    pub fn is_renew(&self) -> bool {
        self.renew
    }
}

impl ValidationSpecification for RenewOnly {
    fn is_satisfied_by(&self, assertion: &Assertion, _request: &ValidationRequest) -> bool {
        renew_satisfied(self.renew, assertion)
    }
}
