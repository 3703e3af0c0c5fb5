use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::attributes::Attributes;
use crate::principal::Principal;

/// The service (relying party URL) a request is made for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Service {
    id: String,
}

impl Service {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// A relying party registered with the SSO server, together with the
/// policies the decision core consults. The core never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisteredService {
    pub id: i64,
    pub name: String,
    /// Pattern of service identifiers this registration covers.
    pub service_id: String,
    pub attribute_release_policy: AttributeReleasePolicy,
    pub consent_policy: ConsentPolicy,
    pub surrogate_policy: SurrogatePolicy,
}

impl Default for RegisteredService {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            service_id: ".*".to_owned(),
            attribute_release_policy: AttributeReleasePolicy::default(),
            consent_policy: ConsentPolicy::default(),
            surrogate_policy: SurrogatePolicy::default(),
        }
    }
}

impl RegisteredService {
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>, service_id: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            service_id: service_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_attribute_release_policy(mut self, policy: AttributeReleasePolicy) -> Self {
        self.attribute_release_policy = policy;
        self
    }

    #[must_use]
    pub fn with_consent_policy(mut self, policy: ConsentPolicy) -> Self {
        self.consent_policy = policy;
        self
    }

    #[must_use]
    pub fn with_surrogate_policy(mut self, policy: SurrogatePolicy) -> Self {
        self.surrogate_policy = policy;
        self
    }
}

/// Which principal attributes may be released to the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttributeReleasePolicy {
    /// Names allowed for release. `None` releases everything.
    pub allowed_attributes: Option<BTreeSet<String>>,
}

impl AttributeReleasePolicy {
    #[must_use]
    pub fn allow<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_attributes: Some(names.into_iter().map(Into::into).collect()),
        }
    }

    /// Attributes released to the service under this policy.
    #[must_use]
    pub fn release(&self, attributes: &Attributes) -> Attributes {
        match &self.allowed_attributes {
            None => attributes.clone(),
            Some(allowed) => attributes.filtered(|name| allowed.contains(name)),
        }
    }
}

/// Per-service consent settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsentPolicy {
    pub enabled: bool,
    /// When set, only these released attributes are subject to consent.
    pub include_only_attributes: Option<BTreeSet<String>>,
    /// Released attributes never subject to consent.
    pub excluded_attributes: BTreeSet<String>,
}

impl Default for ConsentPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            include_only_attributes: None,
            excluded_attributes: BTreeSet::new(),
        }
    }
}

impl ConsentPolicy {
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Narrows released attributes down to the ones the user consents to.
    #[must_use]
    pub fn consentable(&self, released: &Attributes) -> Attributes {
        released.filtered(|name| {
            !self.excluded_attributes.contains(name)
                && self
                    .include_only_attributes
                    .as_ref()
                    .is_none_or(|only| only.contains(name))
        })
    }
}

/// Per-service impersonation eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurrogatePolicy {
    pub enabled: bool,
    /// Attributes the acting principal must carry. An empty value list only
    /// requires the attribute to be present.
    pub required_attributes: BTreeMap<String, Vec<String>>,
}

impl Default for SurrogatePolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            required_attributes: BTreeMap::new(),
        }
    }
}

impl SurrogatePolicy {
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            required_attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn requiring<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.required_attributes
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Whether `actor` may start a surrogate session for the service.
    #[must_use]
    pub fn permits(&self, actor: &Principal) -> bool {
        if !self.enabled {
            return false;
        }
        self.required_attributes.iter().all(|(name, expected)| {
            actor.attributes().get(name).is_some_and(|actual| {
                expected.is_empty() || actual.iter().any(|v| expected.contains(v))
            })
        })
    }
}
