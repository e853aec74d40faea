//! Plugins built into the onboarding binary.
//!
//! Registration is explicit: a plugin crate that is not listed here never runs.

use std::sync::Arc;

use feature_onboarding::PluginRegistry;
use finance::SeaOrmCatalogRepository;
use finance_onboarding_plugin::FinanceOnboardingPlugin;
use membership_onboarding_plugin::{MembershipOnboardingPlugin, SeaOrmMembershipSeedRepository};
use sea_orm::DatabaseConnection;

pub fn register_builtin_plugins(registry: &PluginRegistry, db: &DatabaseConnection) {
    registry.register(Arc::new(MembershipOnboardingPlugin::new(Arc::new(
        SeaOrmMembershipSeedRepository::new(db.clone()),
    ))));
    registry.register(Arc::new(FinanceOnboardingPlugin::new(Arc::new(
        SeaOrmCatalogRepository::new(db.clone()),
    ))));
}
