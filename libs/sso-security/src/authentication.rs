use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::attributes::Attributes;
use crate::principal::Principal;
use crate::service::Service;

/// A single authentication event: who authenticated, when, with which
/// credentials and handlers, plus authentication-level metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authentication {
    principal: Principal,
    /// Authentication metadata (e.g. method, surrogate markers), distinct from
    /// principal attributes.
    #[serde(default)]
    attributes: Attributes,
    authentication_date: OffsetDateTime,
    #[serde(default)]
    credentials: Vec<String>,
    #[serde(default)]
    successes: Vec<String>,
}

impl Authentication {
    #[must_use]
    pub fn builder(principal: Principal) -> AuthenticationBuilder {
        AuthenticationBuilder::new(principal)
    }

    /// Starts a builder pre-populated from this authentication.
    #[must_use]
    pub fn to_builder(&self) -> AuthenticationBuilder {
        AuthenticationBuilder {
            principal: self.principal.clone(),
            attributes: self.attributes.clone(),
            authentication_date: Some(self.authentication_date),
            credentials: self.credentials.clone(),
            successes: self.successes.clone(),
        }
    }

    #[must_use]
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    #[must_use]
    pub fn authentication_date(&self) -> OffsetDateTime {
        self.authentication_date
    }

    /// Identifiers of the credentials presented.
    #[must_use]
    pub fn credentials(&self) -> &[String] {
        &self.credentials
    }

    /// Names of the handlers that succeeded.
    #[must_use]
    pub fn successes(&self) -> &[String] {
        &self.successes
    }
}

pub struct AuthenticationBuilder {
    principal: Principal,
    attributes: Attributes,
    authentication_date: Option<OffsetDateTime>,
    credentials: Vec<String>,
    successes: Vec<String>,
}

impl AuthenticationBuilder {
    fn new(principal: Principal) -> Self {
        Self {
            principal,
            attributes: Attributes::default(),
            authentication_date: None,
            credentials: Vec::new(),
            successes: Vec::new(),
        }
    }

    #[must_use]
    pub fn principal(mut self, principal: Principal) -> Self {
        self.principal = principal;
        self
    }

    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, values: Vec<String>) -> Self {
        self.attributes.insert(name, values);
        self
    }

    #[must_use]
    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    #[must_use]
    pub fn authentication_date(mut self, date: OffsetDateTime) -> Self {
        self.authentication_date = Some(date);
        self
    }

    #[must_use]
    pub fn credential(mut self, id: impl Into<String>) -> Self {
        self.credentials.push(id.into());
        self
    }

    #[must_use]
    pub fn success(mut self, handler: impl Into<String>) -> Self {
        self.successes.push(handler.into());
        self
    }

    #[must_use]
    pub fn build(self) -> Authentication {
        Authentication {
            principal: self.principal,
            attributes: self.attributes,
            authentication_date: self
                .authentication_date
                .unwrap_or_else(OffsetDateTime::now_utc),
            credentials: self.credentials,
            successes: self.successes,
        }
    }
}

/// Accumulates authentications and credentials while an authentication
/// transaction is in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthenticationResultBuilder {
    authentications: Vec<Authentication>,
    credentials: Vec<String>,
}

impl AuthenticationResultBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn collect(mut self, authentication: Authentication) -> Self {
        self.authentications.push(authentication);
        self
    }

    #[must_use]
    pub fn collect_credential(mut self, id: impl Into<String>) -> Self {
        self.credentials.push(id.into());
        self
    }

    /// The first authentication collected in this transaction.
    #[must_use]
    pub fn initial_authentication(&self) -> Option<&Authentication> {
        self.authentications.first()
    }

    #[must_use]
    pub fn authentications(&self) -> &[Authentication] {
        &self.authentications
    }

    #[must_use]
    pub fn credentials(&self) -> &[String] {
        &self.credentials
    }

    /// Replaces the initial authentication in place, keeping the rest of the
    /// transaction untouched. Collects it when nothing was collected yet.
    #[must_use]
    pub fn replace_initial_authentication(mut self, authentication: Authentication) -> Self {
        match self.authentications.first_mut() {
            Some(initial) => *initial = authentication,
            None => self.authentications.push(authentication),
        }
        self
    }

    /// Merges the collected authentications into one result.
    ///
    /// The principal comes from the initial authentication; authentication
    /// attributes, credentials and successes are combined across all of them.
    /// Returns `None` when nothing was collected.
    #[must_use]
    pub fn build(self, service: Option<Service>) -> Option<AuthenticationResult> {
        let (initial, rest) = self.authentications.split_first()?;

        let mut attributes = initial.attributes.clone();
        let mut credentials = self.credentials;
        let mut successes = initial.successes.clone();
        credentials.extend(initial.credentials.iter().cloned());

        for auth in rest {
            for (name, values) in auth.attributes() {
                let fresh: Vec<String> = values
                    .iter()
                    .filter(|v| attributes.get(name).is_none_or(|cur| !cur.contains(v)))
                    .cloned()
                    .collect();
                attributes.extend_values(name.clone(), fresh);
            }
            credentials.extend(auth.credentials.iter().cloned());
            successes.extend(auth.successes.iter().cloned());
        }
        credentials.dedup();
        successes.dedup();

        let authentication = Authentication {
            principal: initial.principal.clone(),
            attributes,
            authentication_date: initial.authentication_date,
            credentials,
            successes,
        };

        Some(AuthenticationResult {
            authentication,
            service,
        })
    }
}

/// Final outcome of an authentication transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    pub authentication: Authentication,
    pub service: Option<Service>,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn auth(id: &str) -> Authentication {
        Authentication::builder(Principal::named(id))
            .attribute("authenticationMethod", vec!["password".to_owned()])
            .credential(id)
            .success("AcceptUsersAuthenticationHandler")
            .build()
    }

    #[test]
    fn to_builder_preserves_every_field() {
        let original = auth("casuser");
        let copy = original.to_builder().build();
        assert_eq!(copy, original);
    }

    #[test]
    fn initial_authentication_is_first_collected() {
        let builder = AuthenticationResultBuilder::new()
            .collect(auth("first"))
            .collect(auth("second"));

        assert_eq!(
            builder.initial_authentication().map(|a| a.principal().id()),
            Some("first")
        );
        assert_eq!(builder.authentications().len(), 2);
    }

    #[test]
    fn replace_initial_authentication_keeps_length() {
        let builder = AuthenticationResultBuilder::new()
            .collect(auth("first"))
            .collect(auth("second"))
            .replace_initial_authentication(auth("replaced"));

        assert_eq!(builder.authentications().len(), 2);
        assert_eq!(builder.authentications()[0].principal().id(), "replaced");
        assert_eq!(builder.authentications()[1].principal().id(), "second");
    }

    #[test]
    fn replace_on_empty_builder_collects() {
        let builder = AuthenticationResultBuilder::new().replace_initial_authentication(auth("x"));
        assert_eq!(builder.authentications().len(), 1);
    }

    #[test]
    fn build_merges_authentications() {
        let second = Authentication::builder(Principal::named("second"))
            .attribute("authenticationMethod", vec!["otp".to_owned()])
            .credential("second")
            .success("OtpHandler")
            .build();

        let result = AuthenticationResultBuilder::new()
            .collect(auth("first"))
            .collect(second)
            .collect_credential("first")
            .build(Some(Service::new("https://app.example.org")))
            .unwrap();

        let merged = &result.authentication;
        assert_eq!(merged.principal().id(), "first");
        assert_eq!(
            merged.attributes().get("authenticationMethod").unwrap(),
            &["password", "otp"]
        );
        assert_eq!(merged.successes(), &["AcceptUsersAuthenticationHandler", "OtpHandler"]);
        assert_eq!(result.service.unwrap().id(), "https://app.example.org");
    }

    #[test]
    fn build_without_authentications_is_none() {
        assert!(AuthenticationResultBuilder::new().build(None).is_none());
    }
}
