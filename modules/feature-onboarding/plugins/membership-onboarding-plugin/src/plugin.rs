use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use feature_onboarding_sdk::{
    FeatureOnboardingContext, FeatureOnboardingError, FeatureOnboardingPlugin,
    FeatureOnboardingResult, PluginDescriptor, SeedOutcome, SeedTally,
};
use tracing::{debug, warn};

use crate::catalog;
use crate::repo::{MembershipSeedRepository, NewSeedRecord, SeedCategory, SeedDefinition};

pub const FEATURE_CODE: &str = "members.core";

/// Feature codes granted before the `members.*` family existed.
pub const LEGACY_FEATURE_CODES: [&str; 3] = ["membership", "member_management", "members"];

const FEATURE_FAMILY_PREFIX: &str = "members.";

/// Seeds membership types, stages and the discipleship pathway.
pub struct MembershipOnboardingPlugin {
    descriptor: PluginDescriptor,
    repo: Arc<dyn MembershipSeedRepository>,
}

impl MembershipOnboardingPlugin {
    #[must_use]
    pub fn new(repo: Arc<dyn MembershipSeedRepository>) -> Self {
        Self {
            descriptor: PluginDescriptor::new(FEATURE_CODE, "Membership Management")
                .with_description(
                    "Seeds default membership types, membership stages and the discipleship pathway",
                )
                .with_priority(10),
            repo,
        }
    }

    async fn seed_category(
        &self,
        ctx: &FeatureOnboardingContext,
        category: SeedCategory,
    ) -> Result<SeedTally, FeatureOnboardingError> {
        let mut tally = SeedTally::default();
        for definition in catalog::defaults(category) {
            let outcome = self.seed_record(ctx, category, definition).await?;
            tally.record(&outcome);
        }
        debug!(
            category = %category,
            created = tally.created,
            skipped = tally.skipped,
            failed = tally.failed,
            "Seeded membership category"
        );
        Ok(tally)
    }

    async fn seed_record(
        &self,
        ctx: &FeatureOnboardingContext,
        category: SeedCategory,
        definition: &SeedDefinition,
    ) -> Result<SeedOutcome, FeatureOnboardingError> {
        let existing = self
            .repo
            .find_by_code(ctx.tenant_id(), category, definition.code)
            .await
            .map_err(|e| {
                FeatureOnboardingError::repository_with_source(
                    format!("failed to look up {category} '{}'", definition.code),
                    e,
                )
            })?;
        if existing.is_some() {
            return Ok(SeedOutcome::Skipped);
        }

        let record =
            NewSeedRecord::from_definition(category, ctx.tenant_id(), ctx.user_id(), definition);
        match self.repo.insert(&record).await {
            Ok(_) => Ok(SeedOutcome::Created),
            Err(e) => {
                warn!(
                    tenant_id = %ctx.tenant_id(),
                    category = %category,
                    code = definition.code,
                    error = %e,
                    "Failed to seed membership record, continuing"
                );
                Ok(SeedOutcome::Failed(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl FeatureOnboardingPlugin for MembershipOnboardingPlugin {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }

    fn should_execute(&self, ctx: &FeatureOnboardingContext) -> bool {
        ctx.has_feature(FEATURE_CODE)
            || LEGACY_FEATURE_CODES.iter().any(|code| ctx.has_feature(code))
            || ctx.has_feature_with_prefix(FEATURE_FAMILY_PREFIX)
    }

    async fn execute_internal(
        &self,
        ctx: &FeatureOnboardingContext,
    ) -> Result<FeatureOnboardingResult, FeatureOnboardingError> {
        let mut metadata = BTreeMap::new();
        let mut created = 0;
        let mut failed = 0;

        for category in SeedCategory::ALL {
            let tally = self.seed_category(ctx, category).await?;
            tally.write_metadata(category.as_str(), &mut metadata);
            created += tally.created;
            failed += tally.failed;
        }

        let message = if failed == 0 {
            format!("Seeded {created} membership records")
        } else {
            format!("Seeded {created} membership records, {failed} failed")
        };
        Ok(FeatureOnboardingResult::success(message, created, metadata))
    }
}
