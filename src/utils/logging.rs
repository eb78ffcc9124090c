//! Tracing subscriber setup for the CLI.
//!
//! Logs always go to stderr so a report printed on stdout can be piped
//! without interleaved log lines.

use super::toml_config::{LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter directive for the given settings.
///
/// `verbose` forces debug output for this crate; otherwise `RUST_LOG` wins
/// over the configured level.
pub fn filter_directive(config: &LoggingConfig, verbose: bool) -> String {
    if verbose {
        return "webscout=debug,info".to_string();
    }

    std::env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| config.level.clone())
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init_logging(config: &LoggingConfig, verbose: bool) {
    let filter = EnvFilter::try_new(filter_directive(config, verbose))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed(),
    };

    let _ = tracing_subscriber::registry().with(layer).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_overrides_level() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        };
        assert_eq!(filter_directive(&config, true), "webscout=debug,info");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        let config = LoggingConfig::default();
        init_logging(&config, false);
        init_logging(&config, true);
    }
}
