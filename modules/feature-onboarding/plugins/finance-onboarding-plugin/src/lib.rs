//! Finance Onboarding Plugin
//!
//! Seeds the default funds and income/expense categories of a tenant when the
//! `finance.core` feature (or one of its legacy aliases) is granted. Runs
//! after the membership plugin.
//!
//! Seeding is idempotent: a fund or category whose code already exists for
//! the tenant is skipped.

pub mod catalog;
pub mod plugin;

pub use plugin::FinanceOnboardingPlugin;

#[cfg(test)]
mod plugin_test;
