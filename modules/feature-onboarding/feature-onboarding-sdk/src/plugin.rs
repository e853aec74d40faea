//! Feature plugin trait and the uniform execution wrapper.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use futures::FutureExt;
use tracing::{error, info, warn};

use crate::error::FeatureOnboardingError;
use crate::models::{FeatureOnboardingContext, FeatureOnboardingResult, PluginDescriptor};

/// A feature plugin seeding default records when its feature is granted.
///
/// Implementations provide the descriptor and [`execute_internal`]; callers
/// always go through [`FeatureOnboardingPluginExt::execute`], which adds
/// logging and converts every error into a failed result.
///
/// [`execute_internal`]: FeatureOnboardingPlugin::execute_internal
#[async_trait]
pub trait FeatureOnboardingPlugin: Send + Sync {
    fn descriptor(&self) -> &PluginDescriptor;

    fn feature_code(&self) -> &str {
        &self.descriptor().feature_code
    }

    /// Whether this plugin applies to the context.
    ///
    /// Default: the granted features contain this plugin's feature code.
    /// Override to also accept legacy aliases or a feature-code family.
    fn should_execute(&self, ctx: &FeatureOnboardingContext) -> bool {
        ctx.has_feature(self.feature_code())
    }

    /// Seed the plugin's records for the tenant in `ctx`.
    ///
    /// Implementations should tolerate per-record failures and only return
    /// `Err` when the plugin as a whole cannot proceed.
    ///
    /// # Errors
    ///
    /// Returns an error when the plugin-level flow fails.
    async fn execute_internal(
        &self,
        ctx: &FeatureOnboardingContext,
    ) -> Result<FeatureOnboardingResult, FeatureOnboardingError>;
}

/// Execution entry point available on every [`FeatureOnboardingPlugin`].
///
/// Blanket-implemented, so plugins cannot replace it.
#[async_trait]
pub trait FeatureOnboardingPluginExt: FeatureOnboardingPlugin {
    /// Run the plugin. Never fails: errors and panics inside
    /// `execute_internal` come back as a result with `success == false`.
    async fn execute(&self, ctx: &FeatureOnboardingContext) -> FeatureOnboardingResult;
}

#[async_trait]
impl<P> FeatureOnboardingPluginExt for P
where
    P: FeatureOnboardingPlugin + ?Sized,
{
    async fn execute(&self, ctx: &FeatureOnboardingContext) -> FeatureOnboardingResult {
        let descriptor = self.descriptor();
        info!(
            plugin = %descriptor.name,
            feature_code = %descriptor.feature_code,
            tenant_id = %ctx.tenant_id(),
            tier = %ctx.subscription_tier(),
            "Executing feature onboarding plugin"
        );

        let outcome = AssertUnwindSafe(self.execute_internal(ctx))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(result)) => {
                if result.success {
                    info!(
                        feature_code = %descriptor.feature_code,
                        records_created = result.records_created,
                        message = %result.message,
                        "Feature onboarding plugin completed"
                    );
                } else {
                    warn!(
                        feature_code = %descriptor.feature_code,
                        message = %result.message,
                        error = result.error.as_deref().unwrap_or_default(),
                        "Feature onboarding plugin reported failure"
                    );
                }
                result
            }
            Ok(Err(err)) => {
                error!(
                    feature_code = %descriptor.feature_code,
                    tenant_id = %ctx.tenant_id(),
                    error = %err,
                    "Feature onboarding plugin failed"
                );
                FeatureOnboardingResult::failure(
                    format!("Failed to onboard feature {}", descriptor.feature_code),
                    Some(err.to_string()),
                )
            }
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                error!(
                    feature_code = %descriptor.feature_code,
                    tenant_id = %ctx.tenant_id(),
                    panic = %reason,
                    "Feature onboarding plugin panicked"
                );
                FeatureOnboardingResult::failure(
                    format!("Failed to onboard feature {}", descriptor.feature_code),
                    Some(format!("plugin panicked: {reason}")),
                )
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
