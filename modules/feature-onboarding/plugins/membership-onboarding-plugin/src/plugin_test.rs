use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use feature_onboarding_sdk::{
    FeatureOnboardingContext, FeatureOnboardingPlugin, FeatureOnboardingPluginExt,
};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::catalog;
use crate::plugin::MembershipOnboardingPlugin;
use crate::repo::{MembershipSeedRepository, NewSeedRecord, SeedCategory};

// In-memory repository keyed by (tenant, category, code)
#[derive(Default)]
struct MockRepository {
    rows: Mutex<Vec<NewSeedRecord>>,
    failing_codes: HashSet<&'static str>,
    fail_lookups: bool,
}

impl MockRepository {
    fn count(&self, category: SeedCategory) -> usize {
        self.rows
            .lock()
            .iter()
            .filter(|r| r.category == category)
            .count()
    }
}

#[async_trait]
impl MembershipSeedRepository for MockRepository {
    async fn find_by_code(
        &self,
        tenant_id: Uuid,
        category: SeedCategory,
        code: &str,
    ) -> anyhow::Result<Option<Uuid>> {
        if self.fail_lookups {
            anyhow::bail!("connection refused");
        }
        let found = self
            .rows
            .lock()
            .iter()
            .any(|r| r.tenant_id == tenant_id && r.category == category && r.code == code);
        Ok(found.then(Uuid::new_v4))
    }

    async fn insert(&self, record: &NewSeedRecord) -> anyhow::Result<Uuid> {
        if self.failing_codes.contains(record.code.as_str()) {
            anyhow::bail!("constraint violation on {}", record.code);
        }
        self.rows.lock().push(record.clone());
        Ok(Uuid::new_v4())
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
async fn first_run_seeds_full_catalog() {
    let repo = Arc::new(MockRepository::default());
    let plugin = MembershipOnboardingPlugin::new(repo.clone());
    let ctx = ctx(&["members.core"]);

    let result = plugin.execute(&ctx).await;

    assert!(result.success);
    assert_eq!(result.records_created, 12);
    assert_eq!(result.metadata["membership_types_created"], 5);
    assert_eq!(result.metadata["membership_stages_created"], 6);
    assert_eq!(result.metadata["discipleship_pathways_created"], 1);
    assert_eq!(repo.count(SeedCategory::MembershipType), 5);

    let rows = repo.rows.lock();
    assert!(rows.iter().all(|r| r.is_system && r.is_active));
    assert!(rows.iter().all(|r| r.tenant_id == ctx.tenant_id()));
    assert!(rows.iter().all(|r| r.actor_id == ctx.user_id()));
}

#[tokio::test]
async fn second_run_creates_nothing() {
    let repo = Arc::new(MockRepository::default());
    let plugin = MembershipOnboardingPlugin::new(repo.clone());
    let ctx = ctx(&["members.core"]);

    let first = plugin.execute(&ctx).await;
    let second = plugin.execute(&ctx).await;

    assert_eq!(first.records_created, 12);
    assert!(second.success);
    assert_eq!(second.records_created, 0);
    assert_eq!(second.metadata["membership_types_skipped"], 5);
    assert_eq!(repo.rows.lock().len(), catalog::total_defaults());
}

#[tokio::test]
async fn only_missing_records_are_seeded() {
    let repo = Arc::new(MockRepository::default());
    let ctx = ctx(&["members.core"]);
    repo.rows.lock().push(NewSeedRecord::from_definition(
        SeedCategory::MembershipStage,
        ctx.tenant_id(),
        ctx.user_id(),
        &catalog::MEMBERSHIP_STAGES[0],
    ));
    let plugin = MembershipOnboardingPlugin::new(repo.clone());

    let result = plugin.execute(&ctx).await;

    assert_eq!(result.records_created, 11);
    assert_eq!(result.metadata["membership_stages_skipped"], 1);
    assert_eq!(repo.count(SeedCategory::MembershipStage), 6);
}

#[tokio::test]
async fn insert_failure_does_not_stop_the_category() {
    let repo = Arc::new(MockRepository {
        failing_codes: HashSet::from(["regular_attender"]),
        ..MockRepository::default()
    });
    let plugin = MembershipOnboardingPlugin::new(repo.clone());

    let result = plugin.execute(&ctx(&["members.core"])).await;

    assert!(result.success);
    assert_eq!(result.records_created, 11);
    assert_eq!(result.metadata["membership_types_created"], 4);
    assert_eq!(result.metadata["membership_types_failed"], 1);
    // Records after the failing one were still attempted
    let rows = repo.rows.lock();
    assert!(rows.iter().any(|r| r.code == "inactive"));
}

#[tokio::test]
async fn lookup_failure_fails_the_plugin() {
    let repo = Arc::new(MockRepository {
        fail_lookups: true,
        ..MockRepository::default()
    });
    let plugin = MembershipOnboardingPlugin::new(repo.clone());

    let result = plugin.execute(&ctx(&["members.core"])).await;

    assert!(!result.success);
    assert_eq!(result.records_created, 0);
    assert!(
        result
            .error
            .as_deref()
            .is_some_and(|e| e.contains("membership_types"))
    );
    assert!(repo.rows.lock().is_empty());
}

#[test]
fn should_execute_accepts_aliases_and_family() {
    let plugin = MembershipOnboardingPlugin::new(Arc::new(MockRepository::default()));

    assert!(plugin.should_execute(&ctx(&["members.core"])));
    assert!(plugin.should_execute(&ctx(&["membership"])));
    assert!(plugin.should_execute(&ctx(&["member_management"])));
    assert!(plugin.should_execute(&ctx(&["members"])));
    assert!(plugin.should_execute(&ctx(&["members.groups"])));
    assert!(!plugin.should_execute(&ctx(&["finance.core"])));
    assert!(!plugin.should_execute(&ctx(&[])));
}

#[test]
fn descriptor_declares_priority_and_no_dependencies() {
    let plugin = MembershipOnboardingPlugin::new(Arc::new(MockRepository::default()));
    let descriptor = plugin.descriptor();

    assert_eq!(descriptor.feature_code, "members.core");
    assert_eq!(descriptor.priority, 10);
    assert!(descriptor.dependencies.is_empty());
}
