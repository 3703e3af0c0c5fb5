//! Consent SDK
//!
//! This crate provides the public API for the consent module:
//!
//! - [`ConsentRepository`] - storage trait for consent decisions
//! - [`AttributeCipher`] - transform applied to attribute fingerprints at rest
//! - [`ConsentDecision`], [`ConsentOptions`], [`ConsentReminder`] - decision models
//! - [`ConsentError`], [`CipherError`] - error types
//!
//! ## Usage
//!
//! ```ignore
//! use consent_sdk::ConsentRepository;
//!
//! let decision = repo
//!     .find_consent_decision(&service, &registered_service, &authentication)
//!     .await?;
//! ```

pub mod api;
pub mod cipher;
pub mod error;
pub mod models;

pub use api::ConsentRepository;
pub use cipher::AttributeCipher;
pub use error::{CipherError, ConsentError};
pub use models::{ConsentDecision, ConsentOptions, ConsentReminder, ReminderUnit};
