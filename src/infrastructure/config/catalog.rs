//! Query layer settings.

use serde::{Deserialize, Serialize};

use crate::application::catalog::OrchestratorOptions;

/// Settings for the item query orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Number of recommended items to show. Defaults to 3; 0 shows all.
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,
}

impl CatalogConfig {
    /// Cap applied to recommendations, `None` when uncapped.
    #[must_use]
    pub const fn recommendation_cap(&self) -> Option<usize> {
        match self.recommendation_limit {
            0 => None,
            limit => Some(limit),
        }
    }

    /// Orchestrator options derived from this section.
    #[must_use]
    pub const fn orchestrator_options(&self) -> OrchestratorOptions {
        OrchestratorOptions {
            recommendation_limit: self.recommendation_cap(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            recommendation_limit: default_recommendation_limit(),
        }
    }
}

const fn default_recommendation_limit() -> usize {
    3
}
