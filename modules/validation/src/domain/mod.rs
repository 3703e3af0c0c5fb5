//! Domain layer for ticket validation.

pub mod error;
pub mod factory;
pub mod protocol;
pub mod proxy;
pub mod specification;
