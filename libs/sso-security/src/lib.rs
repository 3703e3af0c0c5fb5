#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Shared SSO security models.
//!
//! Every decision component of the SSO core consumes these types:
//!
//! - [`Attributes`] - multi-valued attribute map of a principal or authentication
//! - [`Principal`] - authenticated subject
//! - [`Service`] / [`RegisteredService`] - requesting service and its policies
//! - [`Authentication`] / [`AuthenticationResultBuilder`] - authentication events
//! - [`Assertion`] - outcome of a completed authentication with its proxy chain

pub mod assertion;
pub mod attributes;
pub mod authentication;
pub mod principal;
pub mod service;

pub use assertion::Assertion;
pub use attributes::Attributes;
pub use authentication::{Authentication, AuthenticationResult, AuthenticationResultBuilder};
pub use principal::Principal;
pub use service::{
    AttributeReleasePolicy, ConsentPolicy, RegisteredService, Service, SurrogatePolicy,
};
