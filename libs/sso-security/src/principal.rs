use serde::{Deserialize, Serialize};

use crate::attributes::Attributes;

/// An authenticated subject: identifier plus resolved attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    id: String,
    #[serde(default)]
    attributes: Attributes,
}

impl Principal {
    #[must_use]
    pub fn new(id: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }

    /// Principal without attributes.
    #[must_use]
    pub fn named(id: impl Into<String>) -> Self {
        Self::new(id, Attributes::default())
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    #[must_use]
    pub fn into_attributes(self) -> Attributes {
        self.attributes
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn named_principal_has_no_attributes() {
        let p = Principal::named("casuser");
        assert_eq!(p.id(), "casuser");
        assert!(p.attributes().is_empty());
    }

    #[test]
    fn deserializes_without_attributes_field() {
        let p: Principal = serde_json::from_str(r#"{"id":"casuser"}"#).unwrap();
        assert_eq!(p, Principal::named("casuser"));
    }
}
