//! SSO bootstrap
//!
//! Loads the layered [`AppConfig`], installs the tracing subscriber and wires
//! the three decision components into a [`DecisionCore`].
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod decision_core;
pub mod logging;

pub use config::{AppConfig, LogFormat, LoggingConfig};
pub use decision_core::DecisionCore;
pub use logging::init_logging;
