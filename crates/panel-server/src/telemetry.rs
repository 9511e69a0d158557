use panel_core::config::LoggingConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const DEFAULT_FILTER: &str = "info,tower_http=info";

/// Picks the filter directive: `RUST_LOG`, then the configured filter, then
/// the default.
pub fn filter_directive(config: &LoggingConfig, rust_log: Option<String>) -> String {
    rust_log
        .filter(|value| !value.trim().is_empty())
        .or_else(|| config.filter.clone())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Installs the global subscriber. Text output unless `json` is set.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let directive = filter_directive(config, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    let filter = EnvFilter::try_new(&directive)?;

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_wins_over_config() {
        let config = LoggingConfig {
            json: false,
            filter: Some("debug".to_string()),
        };
        assert_eq!(filter_directive(&config, Some("warn".to_string())), "warn");
        assert_eq!(filter_directive(&config, Some(" ".to_string())), "debug");
        assert_eq!(filter_directive(&LoggingConfig::default(), None), DEFAULT_FILTER);
    }
}
