use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Maps `-v` occurrences to a filter directive. Zero keeps the configured level.
fn verbosity_directive(config: &LoggingConfig, verbose: u8) -> Option<&str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
    .or_else(|| std::env::var_os("RUST_LOG").is_none().then_some(config.level.as_str()))
}

/// Install the global subscriber. Logs go to stderr; stdout carries command output.
pub fn init_logging(config: &LoggingConfig, verbose: u8) {
    let filter = match verbosity_directive(config, verbose) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_flag_wins_over_config() {
        let config = LoggingConfig {
            level: "warn".to_owned(),
            json: false,
        };

        assert_eq!(verbosity_directive(&config, 1), Some("info"));
        assert_eq!(verbosity_directive(&config, 2), Some("debug"));
        assert_eq!(verbosity_directive(&config, 5), Some("trace"));
    }
}
