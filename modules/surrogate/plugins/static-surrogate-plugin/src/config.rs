//! Configuration for the static surrogate plugin.

use std::collections::BTreeMap;

use serde::Deserialize;
use sso_security::Attributes;

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticSurrogatePluginConfig {
    /// Actor id to the accounts it may act as. `"*"` means any account.
    pub accounts: BTreeMap<String, Vec<String>>,

    /// Account id to its attributes.
    pub attributes: BTreeMap<String, Attributes>,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn deserializes_mappings() {
        let cfg: StaticSurrogatePluginConfig = serde_json::from_str(
            r#"{
                "accounts": {"casuser": ["jdoe"], "helpdesk": ["*"]},
                "attributes": {"jdoe": {"mail": ["jdoe@example.org"]}}
            }"#,
        )
        .unwrap();

        assert_eq!(cfg.accounts["helpdesk"], ["*"]);
        assert_eq!(cfg.attributes["jdoe"].first("mail"), Some("jdoe@example.org"));
    }
}
