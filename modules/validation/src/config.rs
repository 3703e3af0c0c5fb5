//! Configuration for ticket validation.

use serde::Deserialize;

/// Configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Require a fresh login for every validation, regardless of the
    /// request's own `renew` flag.
    pub renew: bool,

    /// Regular expressions matching services allowed to act as proxies.
    ///
    /// Patterns are anchored: each must match the whole proxy callback URL.
    /// Empty means no service may proxy.
    pub allowed_proxy_patterns: Vec<String>,
}
