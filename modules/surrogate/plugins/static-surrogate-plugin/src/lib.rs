#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Surrogate Plugin
//!
//! Configuration-driven collaborators for the surrogate module, meant for
//! development and testing:
//!
//! - **authorization**: maps each actor to the accounts it may act as; the
//!   account `*` grants every account except the actor itself.
//! - **attributes**: maps account ids to their attributes.
//!
//! ## Configuration
//!
//! ```yaml
//! surrogate_plugin:
//!   accounts:
//!     casuser: ["jdoe", "jsmith"]
//!     helpdesk: ["*"]
//!   attributes:
//!     jdoe:
//!       mail: ["jdoe@example.org"]
//! ```

pub mod config;
pub mod domain;

pub use config::StaticSurrogatePluginConfig;
pub use domain::service::Service;
