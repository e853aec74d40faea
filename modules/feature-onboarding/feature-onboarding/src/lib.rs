//! Feature Onboarding Module
//!
//! Holds the registry of feature plugins and runs them for a tenant when
//! features are granted (registration or subscription upgrade).
//!
//! ## Architecture
//!
//! - **Registry**: plugins keyed by feature code, ordered by priority and
//!   then by declared dependencies (topological sort)
//! - **Service**: walks the ordered plugins, executes those that apply to the
//!   context one after another, and reports a per-feature summary
//! - **Plugins**: live in their own crates and implement
//!   [`FeatureOnboardingPlugin`]; the application registers them explicitly at
//!   bootstrap

pub use feature_onboarding_sdk::*;

pub mod config;
pub mod domain;
pub mod registry;

pub use config::FeatureOnboardingConfig;
pub use domain::{OnboardingSummary, PluginRun, Service};
pub use registry::PluginRegistry;
