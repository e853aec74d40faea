//! Layered application configuration.
//!
//! Built-in defaults, then the YAML file given with `--config`, then
//! `STEWARD__*` environment variables (`STEWARD__DATABASE__DSN` sets
//! `database.dsn`), then command-line overrides.

use std::path::Path;

use anyhow::Context;
use feature_onboarding::FeatureOnboardingConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use finance::FinanceConfig;
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "STEWARD__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub feature_onboarding: FeatureOnboardingConfig,
    pub finance: FinanceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// `sea-orm` connection string.
    #[serde(default = "default_dsn")]
    pub dsn: String,
}

fn default_dsn() -> String {
    "sqlite::memory:".to_owned()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { dsn: default_dsn() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive when neither `-v` nor `RUST_LOG` is given.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit one JSON object per event instead of human-readable lines.
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_owned()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load defaults, the optional YAML file and `STEWARD__*` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a layer holds an unknown key or a value of the
    /// wrong type.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")
    }
}
