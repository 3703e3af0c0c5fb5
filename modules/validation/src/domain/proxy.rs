//! Proxy authorization for proxied assertions.

use std::fmt::Debug;

use regex::RegexSet;

use super::error::ValidationConfigError;

/// Answers whether a service may act as a proxy.
pub trait ProxyAuthorization: Debug + Send + Sync {
    fn is_allowed_to_proxy(&self, service: &str) -> bool;
}

/// Authorizes proxy services whose URL fully matches one of a set of regular
/// expressions.
#[derive(Debug, Clone)]
pub struct RegexProxyAuthorization {
    patterns: RegexSet,
}

impl RegexProxyAuthorization {
    /// Compiles the patterns, anchoring each one to the whole URL.
    ///
    /// # Errors
    ///
    /// Returns `InvalidProxyPattern` naming the first pattern that fails to
    /// compile.
    pub fn new<I, S>(patterns: I) -> Result<Self, ValidationConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let anchored: Vec<String> = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                regex::Regex::new(p).map_err(|e| ValidationConfigError::InvalidProxyPattern {
                    pattern: p.to_owned(),
                    reason: e.to_string(),
                })?;
                Ok(format!("^(?:{p})$"))
            })
            .collect::<Result<_, ValidationConfigError>>()?;

        let patterns =
            RegexSet::new(&anchored).map_err(|e| ValidationConfigError::InvalidProxyPattern {
                pattern: anchored.join(", "),
                reason: e.to_string(),
            })?;

        Ok(Self { patterns })
    }

    /// Authorizes no service at all.
    #[must_use]
    pub fn deny_all() -> Self {
        Self {
            patterns: RegexSet::empty(),
        }
    }
}

impl ProxyAuthorization for RegexProxyAuthorization {
    fn is_allowed_to_proxy(&self, service: &str) -> bool {
        self.patterns.is_match(service)
    }
}
