//! Membership Onboarding Plugin
//!
//! Seeds the default membership catalog of a tenant when the `members.core`
//! feature (or one of its legacy aliases) is granted:
//!
//! - membership types (member, regular attender, visitor, ...)
//! - membership stages of the assimilation funnel
//! - the default discipleship pathway
//!
//! Seeding is idempotent: a record whose code already exists for the tenant
//! is skipped.

pub mod catalog;
pub mod infra;
pub mod plugin;
pub mod repo;

pub use infra::storage::migrations::Migrator;
pub use infra::storage::sea_orm_repo::SeaOrmMembershipSeedRepository;
pub use plugin::MembershipOnboardingPlugin;
pub use repo::{MembershipSeedRepository, NewSeedRecord, SeedCategory, SeedDefinition};

#[cfg(test)]
mod plugin_test;
