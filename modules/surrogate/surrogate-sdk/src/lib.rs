//! Surrogate SDK
//!
//! This crate provides the public API for the surrogate module:
//!
//! - [`SurrogateAuthorizationClient`] - who may act as whom, and for which service
//! - [`PrincipalAttributeRepository`] - attribute source for surrogate principals
//! - [`SurrogateCredential`], [`SurrogatePrincipal`], [`SurrogateAuthenticationResult`] - models
//! - [`SurrogateError`] - error type
//!
//! ## Usage
//!
//! ```ignore
//! use surrogate_sdk::{SurrogateAuthorizationClient, SurrogateCredential};
//!
//! let credential = SurrogateCredential::parse("jdoe+casuser", '+')?;
//! let allowed = authz
//!     .can_act_as(&actor, credential.surrogate_username(), Some(&registered_service))
//!     .await?;
//! ```

pub mod api;
pub mod error;
pub mod models;

pub use api::{PrincipalAttributeRepository, SurrogateAuthorizationClient};
pub use error::SurrogateError;
pub use models::{
    SURROGATE_ENABLED_ATTRIBUTE, SURROGATE_PRINCIPAL_ATTRIBUTE, SURROGATE_USER_ATTRIBUTE,
    SurrogateAuthenticationResult, SurrogateCredential, SurrogatePrincipal, WILDCARD_ACCOUNT,
};
