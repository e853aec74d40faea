use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use feature_onboarding_sdk::{
    FeatureOnboardingContext, FeatureOnboardingPlugin, FeatureOnboardingPluginExt,
};
use finance::{Category, CatalogRepository, Fund, NewCategory, NewFund, TransactionType};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::catalog;
use crate::plugin::FinanceOnboardingPlugin;

#[derive(Default)]
struct MockCatalog {
    funds: Mutex<Vec<Fund>>,
    categories: Mutex<Vec<Category>>,
    failing_codes: HashSet<&'static str>,
    fail_lookups: bool,
}

#[async_trait]
impl CatalogRepository for MockCatalog {
    async fn list_funds(&self, tenant_id: Uuid) -> anyhow::Result<Vec<Fund>> {
        Ok(self
            .funds
            .lock()
            .iter()
            .filter(|f| f.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn list_categories(&self, tenant_id: Uuid) -> anyhow::Result<Vec<Category>> {
        Ok(self
            .categories
            .lock()
            .iter()
            .filter(|c| c.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn find_fund_by_code(&self, tenant_id: Uuid, code: &str) -> anyhow::Result<Option<Fund>> {
        if self.fail_lookups {
            anyhow::bail!("connection refused");
        }
        Ok(self
            .funds
            .lock()
            .iter()
            .find(|f| f.tenant_id == tenant_id && f.code == code)
            .cloned())
    }

    async fn find_category_by_code(
        &self,
        tenant_id: Uuid,
        code: &str,
    ) -> anyhow::Result<Option<Category>> {
        if self.fail_lookups {
            anyhow::bail!("connection refused");
        }
        Ok(self
            .categories
            .lock()
            .iter()
            .find(|c| c.tenant_id == tenant_id && c.code == code)
            .cloned())
    }

    async fn insert_fund(&self, new: &NewFund) -> anyhow::Result<Fund> {
        if self.failing_codes.contains(new.code.as_str()) {
            anyhow::bail!("constraint violation on {}", new.code);
        }
        let fund = Fund {
            id: Uuid::new_v4(),
            tenant_id: new.tenant_id,
            code: new.code.clone(),
            name: new.name.clone(),
            description: new.description.clone(),
            is_system: new.is_system,
            is_active: new.is_active,
        };
        self.funds.lock().push(fund.clone());
        Ok(fund)
    }

    async fn insert_category(&self, new: &NewCategory) -> anyhow::Result<Category> {
        if self.failing_codes.contains(new.code.as_str()) {
            anyhow::bail!("constraint violation on {}", new.code);
        }
        let category = Category {
            id: Uuid::new_v4(),
            tenant_id: new.tenant_id,
            code: new.code.clone(),
            name: new.name.clone(),
            category_type: new.category_type,
            is_system: new.is_system,
            is_active: new.is_active,
        };
        self.categories.lock().push(category.clone());
        Ok(category)
    }
}

fn ctx(features: &[&str]) -> FeatureOnboardingContext {
    FeatureOnboardingContext::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        "standard",
        features.iter().copied(),
    )
}

#[tokio::test]
async fn first_run_seeds_funds_and_categories() {
    let repo = Arc::new(MockCatalog::default());
    let plugin = FinanceOnboardingPlugin::new(repo.clone());
    let ctx = ctx(&["finance.core"]);

    let result = plugin.execute(&ctx).await;

    assert!(result.success, "{result:?}");
    assert_eq!(result.records_created, 11);
    assert_eq!(result.metadata["funds_created"], 3);
    assert_eq!(result.metadata["categories_created"], 8);
    assert_eq!(result.metadata["categories_failed"], 0);

    let categories = repo.categories.lock();
    let expense = categories
        .iter()
        .filter(|c| c.category_type == TransactionType::Expense)
        .count();
    assert_eq!(expense, 4);
    assert!(categories.iter().all(|c| c.is_system && c.tenant_id == ctx.tenant_id()));
}

#[tokio::test]
async fn second_run_creates_nothing() {
    let repo = Arc::new(MockCatalog::default());
    let plugin = FinanceOnboardingPlugin::new(repo.clone());
    let ctx = ctx(&["finance.core"]);

    plugin.execute(&ctx).await;
    let second = plugin.execute(&ctx).await;

    assert!(second.success);
    assert_eq!(second.records_created, 0);
    assert_eq!(second.metadata["funds_skipped"], 3);
    assert_eq!(second.metadata["categories_skipped"], 8);
    assert_eq!(repo.funds.lock().len(), catalog::FUNDS.len());
}

#[tokio::test]
async fn tenants_are_seeded_independently() {
    let repo = Arc::new(MockCatalog::default());
    let plugin = FinanceOnboardingPlugin::new(repo.clone());

    let first = plugin.execute(&ctx(&["finance.core"])).await;
    let second = plugin.execute(&ctx(&["finance.core"])).await;

    assert_eq!(first.records_created, 11);
    assert_eq!(second.records_created, 11);
    assert_eq!(repo.categories.lock().len(), 16);
}

#[tokio::test]
async fn insert_failure_is_counted_and_seeding_continues() {
    let repo = Arc::new(MockCatalog {
        failing_codes: HashSet::from(["building", "utilities"]),
        ..MockCatalog::default()
    });
    let plugin = FinanceOnboardingPlugin::new(repo.clone());

    let result = plugin.execute(&ctx(&["finance.core"])).await;

    assert!(result.success);
    assert_eq!(result.records_created, 9);
    assert_eq!(result.metadata["funds_failed"], 1);
    assert_eq!(result.metadata["categories_failed"], 1);
    assert!(result.message.contains("2 failed"));
    assert!(repo.funds.lock().iter().any(|f| f.code == "missions"));
}

#[tokio::test]
async fn lookup_failure_fails_the_plugin() {
    let repo = Arc::new(MockCatalog {
        fail_lookups: true,
        ..MockCatalog::default()
    });
    let plugin = FinanceOnboardingPlugin::new(repo.clone());

    let result = plugin.execute(&ctx(&["finance.core"])).await;

    assert!(!result.success);
    assert_eq!(result.records_created, 0);
    assert!(
        result
            .error
            .as_deref()
            .is_some_and(|e| e.contains("fund 'general'"))
    );
    assert!(repo.funds.lock().is_empty());
}

#[test]
fn should_execute_accepts_aliases_and_family() {
    let plugin = FinanceOnboardingPlugin::new(Arc::new(MockCatalog::default()));

    assert!(plugin.should_execute(&ctx(&["finance.core"])));
    assert!(plugin.should_execute(&ctx(&["finance"])));
    assert!(plugin.should_execute(&ctx(&["accounting"])));
    assert!(plugin.should_execute(&ctx(&["financial_management"])));
    assert!(plugin.should_execute(&ctx(&["finance.budgets"])));
    assert!(!plugin.should_execute(&ctx(&["members.core"])));
    assert!(!plugin.should_execute(&ctx(&["financed"])));
}

#[test]
fn descriptor_depends_on_membership() {
    let plugin = FinanceOnboardingPlugin::new(Arc::new(MockCatalog::default()));
    let descriptor = plugin.descriptor();

    assert_eq!(descriptor.feature_code, "finance.core");
    assert_eq!(descriptor.priority, 20);
    assert_eq!(descriptor.dependencies, ["members.core"]);
}
