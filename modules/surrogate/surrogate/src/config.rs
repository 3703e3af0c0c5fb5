//! Configuration for the surrogate module.

use serde::Deserialize;

use crate::domain::merger::AttributeMerger;

/// Configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurrogateConfig {
    /// Separates the surrogate from the actor in a credential username.
    pub separator: char,

    /// How attributes from several sources are combined.
    pub merger: AttributeMerger,
}

impl Default for SurrogateConfig {
    fn default() -> Self {
        Self {
            separator: '+',
            merger: AttributeMerger::default(),
        }
    }
}
