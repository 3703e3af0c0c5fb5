//! Surrogate Module
//!
//! Lets an authorized actor assume another identity for the rest of an
//! authentication transaction while keeping the actor on record.
//!
//! - [`domain::builder`] - surrogate principal and authentication substitution
//! - [`domain::merger`] - combines attributes from several sources
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

pub use config::SurrogateConfig;
pub use domain::builder::SurrogatePrincipalBuilder;
pub use domain::merger::AttributeMerger;
