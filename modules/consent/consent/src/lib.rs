//! Consent Module
//!
//! Decides when releasing a principal's attributes to a service needs the
//! user's (re-)confirmation, and records those confirmations.
//!
//! - [`domain::fingerprint`] - order-independent digest of released attributes
//! - [`domain::builder`] - builds [`ConsentDecision`](consent_sdk::ConsentDecision)s
//! - [`domain::engine`] - consent-required decision and decision lifecycle
//! - [`infra::storage`] - in-memory [`ConsentRepository`](consent_sdk::ConsentRepository)
//! - [`infra::cipher`] - plain and signing fingerprint transforms
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod infra;

pub use config::{CipherConfig, CipherMode, ConsentConfig};
pub use domain::builder::ConsentDecisionBuilder;
pub use domain::engine::{ConsentEngine, ConsentRequiredReason, ConsentRequirement};
pub use domain::fingerprint::AttributeFingerprinter;
pub use infra::cipher::{PlainCipher, SigningCipher, build_cipher};
pub use infra::storage::InMemoryConsentRepository;
