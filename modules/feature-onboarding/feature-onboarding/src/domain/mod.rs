//! Domain layer for feature onboarding.

pub mod service;

pub use service::{OnboardingSummary, PluginRun, Service};
