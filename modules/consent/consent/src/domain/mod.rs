//! Domain layer for consent.

pub mod builder;
pub mod engine;
pub mod fingerprint;
