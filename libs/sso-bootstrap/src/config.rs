//! Layered application configuration.

use std::path::Path;

use anyhow::Context;
use consent::ConsentConfig;
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::Deserialize;
use static_surrogate_plugin::StaticSurrogatePluginConfig;
use surrogate::SurrogateConfig;
use ticket_validation::ValidationConfig;

/// Prefix of environment variables overriding file configuration.
pub const ENV_PREFIX: &str = "SSO_";

/// Separator of nested keys in environment variable names.
pub const ENV_SEPARATOR: &str = "__";

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub validation: ValidationConfig,
    pub consent: ConsentConfig,
    pub surrogate: SurrogateConfig,
    pub surrogate_plugin: StaticSurrogatePluginConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive such as `info,consent=debug`. Falls back to
    /// `RUST_LOG`, then `info`.
    pub level: Option<String>,

    pub format: LogFormat,
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl AppConfig {
    /// Loads defaults, then `path` when given, then `SSO_*` environment
    /// variables (`SSO_CONSENT__ENABLED=false` sets `consent.enabled`).
    ///
    /// # Errors
    ///
    /// Fails when `path` does not exist or the merged configuration does not
    /// deserialize.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            anyhow::ensure!(
                path.exists(),
                "configuration file {} not found",
                path.display()
            );
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR));

        figment
            .extract()
            .context("failed to load SSO configuration")
    }
}
