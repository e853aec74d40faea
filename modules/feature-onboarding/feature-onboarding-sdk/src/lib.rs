//! Feature Onboarding SDK
//!
//! This crate provides the public contract of the `feature-onboarding` module:
//!
//! - [`FeatureOnboardingPlugin`] - trait implemented by every feature plugin
//! - [`FeatureOnboardingPluginExt`] - the uniform `execute` wrapper (logging and
//!   error containment) available on every plugin
//! - [`FeatureOnboardingContext`], [`PluginDescriptor`], [`FeatureOnboardingResult`]
//! - [`FeatureOnboardingError`] - error types
//! - [`SeedOutcome`], [`SeedTally`] - per-record seeding outcomes and counts
//!
//! ## Usage
//!
//! ```
//! # use feature_onboarding_sdk::*;
//! # use async_trait::async_trait;
//! # use uuid::Uuid;
//! struct GreetingPlugin {
//!     descriptor: PluginDescriptor,
//! }
//!
//! #[async_trait]
//! impl FeatureOnboardingPlugin for GreetingPlugin {
//!     fn descriptor(&self) -> &PluginDescriptor {
//!         &self.descriptor
//!     }
//!
//!     async fn execute_internal(
//!         &self,
//!         _ctx: &FeatureOnboardingContext,
//!     ) -> Result<FeatureOnboardingResult, FeatureOnboardingError> {
//!         Ok(FeatureOnboardingResult::success("nothing to seed", 0, Default::default()))
//!     }
//! }
//!
//! # async fn example() {
//! let plugin = GreetingPlugin {
//!     descriptor: PluginDescriptor::new("greetings.core", "Greetings"),
//! };
//! let ctx = FeatureOnboardingContext::new(
//!     Uuid::new_v4(),
//!     Uuid::new_v4(),
//!     "standard",
//!     ["greetings.core"],
//! );
//! assert!(plugin.should_execute(&ctx));
//! let result = plugin.execute(&ctx).await;
//! assert!(result.success);
//! # }
//! ```
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod error;
pub mod models;
pub mod plugin;
pub mod seed;

pub use error::FeatureOnboardingError;
pub use models::{FeatureOnboardingContext, FeatureOnboardingResult, PluginDescriptor};
pub use plugin::{FeatureOnboardingPlugin, FeatureOnboardingPluginExt};
pub use seed::{SeedOutcome, SeedTally};
