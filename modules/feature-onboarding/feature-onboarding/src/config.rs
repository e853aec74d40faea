//! Configuration for the feature onboarding module.

use serde::{Deserialize, Serialize};

/// Feature onboarding configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeatureOnboardingConfig {
    /// Feature codes whose plugins are never executed, even when granted.
    pub disabled_plugins: Vec<String>,
}

impl FeatureOnboardingConfig {
    #[must_use]
    pub fn is_disabled(&self, feature_code: &str) -> bool {
        self.disabled_plugins.iter().any(|c| c == feature_code)
    }
}
