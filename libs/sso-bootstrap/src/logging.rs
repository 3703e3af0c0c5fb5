//! Tracing subscriber setup.

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LogFormat, LoggingConfig};

/// Installs the global tracing subscriber.
///
/// The filter comes from `config.level`, else `RUST_LOG`, else `info`.
///
/// # Errors
///
/// Fails when the filter directive is invalid or a global subscriber is
/// already installed.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Text => registry.with(fmt::layer()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };
    installed.context("global tracing subscriber already installed")
}

fn build_filter(config: &LoggingConfig) -> anyhow::Result<EnvFilter> {
    match &config.level {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log filter '{directive}'")),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))),
    }
}
