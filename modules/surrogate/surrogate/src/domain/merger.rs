use serde::Deserialize;
use sso_security::Attributes;

/// Strategy for combining attributes gathered from several sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeMerger {
    /// Later sources overwrite earlier values of the same attribute.
    #[default]
    Replace,
    /// Later sources only contribute attributes not seen yet.
    Add,
    /// Values of the same attribute are unioned, keeping first-seen order.
    MultiValued,
}

impl AttributeMerger {
    /// Merges `incoming` into `base`.
    #[must_use]
    pub fn merge(self, mut base: Attributes, incoming: Attributes) -> Attributes {
        for (name, values) in incoming {
            match self {
                Self::Replace => {
                    base.insert(name, values);
                }
                Self::Add => {
                    if !base.contains(&name) {
                        base.insert(name, values);
                    }
                }
                Self::MultiValued => {
                    let fresh: Vec<String> = values
                        .into_iter()
                        .filter(|v| base.get(&name).is_none_or(|cur| !cur.contains(v)))
                        .collect();
                    base.extend_values(name, fresh);
                }
            }
        }
        base
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn base() -> Attributes {
        Attributes::new()
            .with("mail", "jdoe@example.org")
            .with_values("memberOf", ["staff"])
    }

    fn incoming() -> Attributes {
        Attributes::new()
            .with_values("memberOf", ["faculty", "staff"])
            .with("phone", "555-0100")
    }

    #[test]
    fn replace_overwrites_colliding_attributes() {
        let merged = AttributeMerger::Replace.merge(base(), incoming());
        assert_eq!(merged.get("memberOf").unwrap(), ["faculty", "staff"]);
        assert_eq!(merged.first("phone"), Some("555-0100"));
        assert_eq!(merged.first("mail"), Some("jdoe@example.org"));
    }

    #[test]
    fn add_keeps_existing_attributes() {
        let merged = AttributeMerger::Add.merge(base(), incoming());
        assert_eq!(merged.get("memberOf").unwrap(), ["staff"]);
        assert_eq!(merged.first("phone"), Some("555-0100"));
    }

    #[test]
    fn multivalued_unions_values() {
        let merged = AttributeMerger::MultiValued.merge(base(), incoming());
        assert_eq!(merged.get("memberOf").unwrap(), ["staff", "faculty"]);
        assert_eq!(merged.len(), 3);
    }
}
