//! Configuration for the finance module.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Finance module configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinanceConfig {
    /// How long the enriched transaction list of a tenant stays cached.
    #[serde(default = "default_transactions_cache_ttl", with = "humantime_duration")]
    pub transactions_cache_ttl: Duration,

    /// Disable to always read transactions from storage.
    #[serde(default = "default_transactions_cache_enabled")]
    pub transactions_cache_enabled: bool,
}

fn default_transactions_cache_ttl() -> Duration {
    Duration::from_mins(5)
}

fn default_transactions_cache_enabled() -> bool {
    true
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            transactions_cache_ttl: default_transactions_cache_ttl(),
            transactions_cache_enabled: default_transactions_cache_enabled(),
        }
    }
}

/// Human-readable durations (`"5m"`, `"90s"`, `"1h 30m"`).
mod humantime_duration {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&humantime::format_duration(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(&raw).map_err(|e| {
            de::Error::custom(format_args!("invalid duration '{raw}': {e}"))
        })
    }
}
