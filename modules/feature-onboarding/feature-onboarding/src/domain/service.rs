//! Onboarding orchestrator.
//!
//! Runs every applicable plugin for one tenant, in registry order, one at a
//! time. A failing plugin is recorded and the run continues with the next one.

use std::sync::Arc;

use feature_onboarding_sdk::{
    FeatureOnboardingContext, FeatureOnboardingError, FeatureOnboardingPluginExt,
    FeatureOnboardingResult,
};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::FeatureOnboardingConfig;
use crate::registry::PluginRegistry;

/// Outcome of one plugin inside a run.
#[derive(Debug, Clone, Serialize)]
pub struct PluginRun {
    pub feature_code: String,
    pub result: FeatureOnboardingResult,
}

/// Report of an onboarding run for a tenant.
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingSummary {
    pub tenant_id: Uuid,
    /// Executed plugins in execution order.
    pub results: Vec<PluginRun>,
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
    /// Registered plugins that did not run: disabled by configuration or not
    /// applicable to the granted features.
    pub skipped: Vec<String>,
    pub total_records_created: u64,
}

impl OnboardingSummary {
    fn new(tenant_id: Uuid) -> Self {
        Self {
            tenant_id,
            results: Vec::new(),
            succeeded: Vec::new(),
            failed: Vec::new(),
            skipped: Vec::new(),
            total_records_created: 0,
        }
    }

    fn record(&mut self, feature_code: String, result: FeatureOnboardingResult) {
        if result.success {
            self.total_records_created += u64::from(result.records_created);
            self.succeeded.push(feature_code.clone());
        } else {
            self.failed.push(feature_code.clone());
        }
        self.results.push(PluginRun {
            feature_code,
            result,
        });
    }

    /// `true` when no executed plugin failed.
    #[must_use]
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Feature onboarding service.
pub struct Service {
    registry: Arc<PluginRegistry>,
    config: FeatureOnboardingConfig,
}

impl Service {
    #[must_use]
    pub fn new(registry: Arc<PluginRegistry>, config: FeatureOnboardingConfig) -> Self {
        Self { registry, config }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    /// Execute every enabled plugin whose `should_execute` accepts `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureOnboardingError::InvalidContext`] when the tenant or
    /// user id is nil. Plugin failures never surface here; they are reported
    /// in the summary.
    #[tracing::instrument(skip_all, fields(
        tenant_id = %ctx.tenant_id(),
        tier = %ctx.subscription_tier()
    ))]
    pub async fn run(
        &self,
        ctx: &FeatureOnboardingContext,
    ) -> Result<OnboardingSummary, FeatureOnboardingError> {
        if ctx.tenant_id().is_nil() {
            return Err(FeatureOnboardingError::invalid_context("tenant id is nil"));
        }
        if ctx.user_id().is_nil() {
            return Err(FeatureOnboardingError::invalid_context("user id is nil"));
        }

        let plugins = self.registry.get_all_sorted();
        info!(
            registered = plugins.len(),
            granted = ctx.granted_features().len(),
            "Starting feature onboarding"
        );

        let mut summary = OnboardingSummary::new(ctx.tenant_id());
        for plugin in plugins {
            let code = plugin.feature_code().to_owned();

            if self.config.is_disabled(&code) {
                debug!(feature_code = %code, "Plugin disabled by configuration");
                summary.skipped.push(code);
                continue;
            }
            if !plugin.should_execute(ctx) {
                debug!(feature_code = %code, "Feature not granted, skipping plugin");
                summary.skipped.push(code);
                continue;
            }

            let result = plugin.execute(ctx).await;
            summary.record(code, result);
        }

        if summary.is_complete_success() {
            info!(
                executed = summary.results.len(),
                records_created = summary.total_records_created,
                "Feature onboarding completed"
            );
        } else {
            warn!(
                executed = summary.results.len(),
                failed = ?summary.failed,
                records_created = summary.total_records_created,
                "Feature onboarding completed with failures"
            );
        }

        Ok(summary)
    }
}
