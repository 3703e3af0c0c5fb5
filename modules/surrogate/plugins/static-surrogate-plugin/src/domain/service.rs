//! Service implementation for the static surrogate plugin.

use std::collections::{BTreeMap, BTreeSet};

use sso_security::Attributes;
use surrogate_sdk::WILDCARD_ACCOUNT;

use crate::config::StaticSurrogatePluginConfig;

/// Static surrogate service backed by configuration maps.
#[derive(Debug, Clone)]
pub struct Service {
    accounts: BTreeMap<String, BTreeSet<String>>,
    attributes: BTreeMap<String, Attributes>,
}

impl Service {
    /// Create a service from plugin configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticSurrogatePluginConfig) -> Self {
        let accounts = cfg
            .accounts
            .iter()
            .map(|(actor, list)| (actor.clone(), list.iter().cloned().collect()))
            .collect();

        Self {
            accounts,
            attributes: cfg.attributes.clone(),
        }
    }

    /// Whether `actor_id` may act as `surrogate`. Nobody acts as themselves.
    #[must_use]
    pub fn is_allowed(&self, actor_id: &str, surrogate: &str) -> bool {
        if actor_id == surrogate {
            return false;
        }
        self.accounts.get(actor_id).is_some_and(|allowed| {
            allowed.contains(WILDCARD_ACCOUNT) || allowed.contains(surrogate)
        })
    }

    /// Configured accounts of `actor_id`, sorted.
    #[must_use]
    pub fn eligible_accounts(&self, actor_id: &str) -> Vec<String> {
        self.accounts
            .get(actor_id)
            .map(|allowed| allowed.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Attributes of `principal_id`, empty when not configured.
    #[must_use]
    pub fn attributes_of(&self, principal_id: &str) -> Attributes {
        self.attributes.get(principal_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn service() -> Service {
        Service::from_config(&StaticSurrogatePluginConfig {
            accounts: BTreeMap::from([
                ("casuser".to_owned(), vec!["jdoe".to_owned(), "jsmith".to_owned()]),
                ("helpdesk".to_owned(), vec![WILDCARD_ACCOUNT.to_owned()]),
            ]),
            attributes: BTreeMap::from([(
                "jdoe".to_owned(),
                Attributes::new().with("mail", "jdoe@example.org"),
            )]),
        })
    }

    #[test]
    fn listed_accounts_are_allowed() {
        let s = service();
        assert!(s.is_allowed("casuser", "jdoe"));
        assert!(!s.is_allowed("casuser", "admin"));
        assert!(!s.is_allowed("unknown", "jdoe"));
    }

    #[test]
    fn wildcard_allows_anyone_but_self() {
        let s = service();
        assert!(s.is_allowed("helpdesk", "anyone"));
        assert!(!s.is_allowed("helpdesk", "helpdesk"));
    }

    #[test]
    fn eligible_accounts_are_sorted() {
        assert_eq!(service().eligible_accounts("casuser"), ["jdoe", "jsmith"]);
        assert!(service().eligible_accounts("nobody").is_empty());
    }

    #[test]
    fn unknown_principal_has_no_attributes() {
        assert!(service().attributes_of("nobody").is_empty());
        assert_eq!(
            service().attributes_of("jdoe").first("mail"),
            Some("jdoe@example.org")
        );
    }
}
