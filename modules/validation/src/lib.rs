//! Ticket Validation
//!
//! Decides whether an [`Assertion`](sso_security::Assertion) may satisfy a
//! ticket validation request:
//!
//! - [`WithoutProxying`] - no proxy hop allowed, optional renew enforcement
//! - [`ProxyingAllowed`] - proxy hops allowed when every proxying service is authorized
//! - [`RenewOnly`] - renew enforcement only
//! - [`ValidationSpecificationChain`] - logical AND over specifications
//! - [`ValidationSpecificationFactory`] - builds the chain for a validation endpoint
//!
//! Specifications are immutable once built and can be shared across threads.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

pub use config::ValidationConfig;
pub use domain::error::ValidationConfigError;
pub use domain::factory::{ValidationEndpoint, ValidationSpecificationFactory};
pub use domain::protocol::{ProxyingAllowed, RenewOnly, WithoutProxying};
pub use domain::proxy::{ProxyAuthorization, RegexProxyAuthorization};
pub use domain::specification::{
    ValidationRequest, ValidationSpecification, ValidationSpecificationChain,
};
