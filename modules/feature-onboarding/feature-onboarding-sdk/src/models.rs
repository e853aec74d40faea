//! Public models for feature onboarding.

use std::collections::BTreeMap;

use serde::Serialize;
use steward_security::SecurityContext;
use uuid::Uuid;

/// Input of one onboarding run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureOnboardingContext {
    tenant_id: Uuid,
    user_id: Uuid,
    subscription_tier: String,
    granted_features: Vec<String>,
}

impl FeatureOnboardingContext {
    /// Build a context. Duplicate feature codes are dropped, keeping the
    /// first occurrence.
    #[must_use]
    pub fn new<I, S>(
        tenant_id: Uuid,
        user_id: Uuid,
        subscription_tier: impl Into<String>,
        granted_features: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut features: Vec<String> = Vec::new();
        for code in granted_features {
            let code = code.into();
            if !features.contains(&code) {
                features.push(code);
            }
        }

        Self {
            tenant_id,
            user_id,
            subscription_tier: subscription_tier.into(),
            granted_features: features,
        }
    }

    /// Build a context for the tenant and subject of a request.
    #[must_use]
    pub fn from_security_context<I, S>(
        ctx: &SecurityContext,
        subscription_tier: impl Into<String>,
        granted_features: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            ctx.tenant_id(),
            ctx.subject_id(),
            subscription_tier,
            granted_features,
        )
    }

    #[must_use]
    pub fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    /// Actor triggering onboarding; stamped as creator of seeded records.
    #[must_use]
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    #[must_use]
    pub fn subscription_tier(&self) -> &str {
        &self.subscription_tier
    }

    #[must_use]
    pub fn granted_features(&self) -> &[String] {
        &self.granted_features
    }

    #[must_use]
    pub fn has_feature(&self, feature_code: &str) -> bool {
        self.granted_features.iter().any(|f| f == feature_code)
    }

    /// Returns `true` if any granted feature code starts with `prefix`.
    #[must_use]
    pub fn has_feature_with_prefix(&self, prefix: &str) -> bool {
        self.granted_features.iter().any(|f| f.starts_with(prefix))
    }
}

/// Static metadata of a feature plugin.
///
/// `feature_code` is the registry key. `name` and `description` have no
/// behavioral effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginDescriptor {
    pub feature_code: String,
    pub name: String,
    pub description: String,
    /// Lower runs earlier among plugins without a dependency relationship.
    pub priority: i32,
    /// Feature codes that must execute before this plugin.
    pub dependencies: Vec<String>,
}

impl PluginDescriptor {
    /// Descriptor with priority 100, no description and no dependencies.
    #[must_use]
    pub fn new(feature_code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            feature_code: feature_code.into(),
            name: name.into(),
            description: String::new(),
            priority: 100,
            dependencies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }
}

/// Outcome of one plugin execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureOnboardingResult {
    pub success: bool,
    pub message: String,
    /// Domain records inserted; 0 on failure or a pure no-op.
    pub records_created: u32,
    /// Present only when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Free-form detail such as per-category counts.
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl FeatureOnboardingResult {
    #[must_use]
    pub fn success(
        message: impl Into<String>,
        records_created: u32,
        metadata: BTreeMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            success: true,
            message: message.into(),
            records_created,
            error: None,
            metadata,
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            records_created: 0,
            error: Some(error.unwrap_or_else(|| "unknown error".to_owned())),
            metadata: BTreeMap::new(),
        }
    }
}
