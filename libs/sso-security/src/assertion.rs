use serde::{Deserialize, Serialize};

use crate::authentication::Authentication;
use crate::service::Service;

/// Result of a completed authentication ceremony, as presented for ticket
/// validation.
///
/// The chain of authentications is never empty: index 0 is the primary
/// authentication and every further entry is a proxy hop. The constructors
/// keep that invariant, there is no way to build an empty chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AssertionRepr")]
pub struct Assertion {
    chained_authentications: Vec<Authentication>,
    service: Service,
    from_new_login: bool,
}

#[derive(Deserialize)]
struct AssertionRepr {
    chained_authentications: Vec<Authentication>,
    service: Service,
    from_new_login: bool,
}

impl TryFrom<AssertionRepr> for Assertion {
    type Error = &'static str;

    fn try_from(repr: AssertionRepr) -> Result<Self, Self::Error> {
        Self::from_chain(repr.chained_authentications, repr.service, repr.from_new_login)
            .ok_or("chained_authentications must not be empty")
    }
}

impl Assertion {
    /// Assertion without any proxy hop.
    #[must_use]
    pub fn new(primary: Authentication, service: Service, from_new_login: bool) -> Self {
        Self {
            chained_authentications: vec![primary],
            service,
            from_new_login,
        }
    }

    /// Assertion from a full chain. Returns `None` for an empty chain.
    #[must_use]
    pub fn from_chain(
        chain: Vec<Authentication>,
        service: Service,
        from_new_login: bool,
    ) -> Option<Self> {
        if chain.is_empty() {
            return None;
        }
        Some(Self {
            chained_authentications: chain,
            service,
            from_new_login,
        })
    }

    /// Appends a proxy hop.
    #[must_use]
    pub fn with_proxy_hop(mut self, hop: Authentication) -> Self {
        self.chained_authentications.push(hop);
        self
    }

    /// The authentication that created the originating ticket.
    #[must_use]
    pub fn primary_authentication(&self) -> &Authentication {
        &self.chained_authentications[0]
    }

    #[must_use]
    pub fn chained_authentications(&self) -> &[Authentication] {
        &self.chained_authentications
    }

    /// Authentications of the proxy hops, in order.
    #[must_use]
    pub fn proxy_hops(&self) -> &[Authentication] {
        &self.chained_authentications[1..]
    }

    #[must_use]
    pub fn is_proxied(&self) -> bool {
        self.chained_authentications.len() > 1
    }

    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// True only when produced by a fresh credential presentation.
    #[must_use]
    pub fn is_from_new_login(&self) -> bool {
        self.from_new_login
    }
}
