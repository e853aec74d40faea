use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use feature_onboarding_sdk::{
    FeatureOnboardingContext, FeatureOnboardingError, FeatureOnboardingPlugin,
    FeatureOnboardingResult, PluginDescriptor, SeedOutcome, SeedTally,
};
use finance::{CatalogRepository, NewCategory, NewFund};
use tracing::{debug, warn};

use crate::catalog::{self, DefaultCategory, DefaultFund};

pub const FEATURE_CODE: &str = "finance.core";

/// Feature codes granted before the `finance.*` family existed.
pub const LEGACY_FEATURE_CODES: [&str; 3] = ["finance", "accounting", "financial_management"];

const FEATURE_FAMILY_PREFIX: &str = "finance.";

/// Finance seeding runs after the membership catalog exists.
const DEPENDS_ON: &str = "members.core";

/// Seeds the default funds and transaction categories.
pub struct FinanceOnboardingPlugin {
    descriptor: PluginDescriptor,
    catalog: Arc<dyn CatalogRepository>,
}

impl FinanceOnboardingPlugin {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self {
            descriptor: PluginDescriptor::new(FEATURE_CODE, "Financial Management")
                .with_description("Seeds default funds and income/expense categories")
                .with_priority(20)
                .with_dependencies([DEPENDS_ON]),
            catalog,
        }
    }

    async fn seed_fund(
        &self,
        ctx: &FeatureOnboardingContext,
        fund: &DefaultFund,
    ) -> Result<SeedOutcome, FeatureOnboardingError> {
        let existing = self
            .catalog
            .find_fund_by_code(ctx.tenant_id(), fund.code)
            .await
            .map_err(|e| lookup_failed("fund", fund.code, e))?;
        if existing.is_some() {
            return Ok(SeedOutcome::Skipped);
        }

        let new = NewFund {
            tenant_id: ctx.tenant_id(),
            actor_id: ctx.user_id(),
            code: fund.code.to_owned(),
            name: fund.name.to_owned(),
            description: fund.description.to_owned(),
            is_system: true,
            is_active: true,
        };
        let inserted = self.catalog.insert_fund(&new).await;
        Ok(insert_outcome(ctx, "fund", fund.code, inserted))
    }

    async fn seed_category(
        &self,
        ctx: &FeatureOnboardingContext,
        category: &DefaultCategory,
    ) -> Result<SeedOutcome, FeatureOnboardingError> {
        let existing = self
            .catalog
            .find_category_by_code(ctx.tenant_id(), category.code)
            .await
            .map_err(|e| lookup_failed("category", category.code, e))?;
        if existing.is_some() {
            return Ok(SeedOutcome::Skipped);
        }

        let new = NewCategory {
            tenant_id: ctx.tenant_id(),
            actor_id: ctx.user_id(),
            code: category.code.to_owned(),
            name: category.name.to_owned(),
            category_type: category.category_type,
            is_system: true,
            is_active: true,
        };
        let inserted = self.catalog.insert_category(&new).await;
        Ok(insert_outcome(ctx, "category", category.code, inserted))
    }
}

fn lookup_failed(kind: &str, code: &str, err: anyhow::Error) -> FeatureOnboardingError {
    FeatureOnboardingError::repository_with_source(format!("failed to look up {kind} '{code}'"), err)
}

fn insert_outcome<T>(
    ctx: &FeatureOnboardingContext,
    kind: &str,
    code: &str,
    inserted: anyhow::Result<T>,
) -> SeedOutcome {
    match inserted {
        Ok(_) => SeedOutcome::Created,
        Err(e) => {
            warn!(
                tenant_id = %ctx.tenant_id(),
                kind,
                code,
                error = %e,
                "Failed to seed finance record, continuing"
            );
            SeedOutcome::Failed(e.to_string())
        }
    }
}

#[async_trait]
impl FeatureOnboardingPlugin for FinanceOnboardingPlugin {
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
        let mut funds = SeedTally::default();
        for fund in &catalog::FUNDS {
            funds.record(&self.seed_fund(ctx, fund).await?);
        }

        let mut categories = SeedTally::default();
        for category in &catalog::CATEGORIES {
            categories.record(&self.seed_category(ctx, category).await?);
        }

        debug!(
            funds_created = funds.created,
            categories_created = categories.created,
            "Seeded finance catalog"
        );

        let mut metadata = BTreeMap::new();
        funds.write_metadata("funds", &mut metadata);
        categories.write_metadata("categories", &mut metadata);

        let created = funds.created + categories.created;
        let failed = funds.failed + categories.failed;
        let message = if failed == 0 {
            format!("Seeded {created} finance records")
        } else {
            format!("Seeded {created} finance records, {failed} failed")
        };
        Ok(FeatureOnboardingResult::success(message, created, metadata))
    }
}
