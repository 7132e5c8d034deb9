//! Logging infrastructure
//!
//! - Console logging on stderr (compact, human-readable)
//! - Optional JSON file logging (daily rolling, for analysis)
//!
//! stdout stays reserved for the progress messages of the CLI.

use crate::config::TelemetryConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the file writer alive until the process exits
pub struct Telemetry {
    _file_guard: Option<WorkerGuard>,
}

impl Telemetry {
    /// Install the global subscriber. `RUST_LOG` overrides the default filter.
    pub fn init(config: &TelemetryConfig) -> anyhow::Result<Self> {
        let make_env_filter = || {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config.verbose))
        };

        let console = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact();

        let file_guard = match config.log_dir {
            Some(ref log_dir) => {
                std::fs::create_dir_all(log_dir)?;
                let file_appender = tracing_appender::rolling::daily(log_dir, "adaptergen.log");
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                tracing_subscriber::registry()
                    .with(make_env_filter())
                    .with(console)
                    .with(fmt::layer().json().with_writer(non_blocking))
                    .try_init()
                    .ok();
                Some(guard)
            }
            None => {
                tracing_subscriber::registry()
                    .with(make_env_filter())
                    .with(console)
                    .try_init()
                    .ok();
                None
            }
        };

        tracing::debug!(
            log_dir = ?config.log_dir,
            verbose = config.verbose,
            "Telemetry initialized"
        );

        Ok(Self {
            _file_guard: file_guard,
        })
    }
}

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug,handlebars=info,hyper=info,reqwest=info,h2=info,rustls=info")
    } else {
        EnvFilter::new("warn")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_log_dir() {
        let temp = TempDir::new().unwrap();
        let log_dir = temp.path().join("logs");
        let config = TelemetryConfig {
            log_dir: Some(log_dir.clone()),
            verbose: true,
        };

        let _telemetry = Telemetry::init(&config).unwrap();
        assert!(log_dir.is_dir());
    }

    #[test]
    fn test_verbose_filter_quiets_template_engine() {
        let filter = default_filter(true).to_string();
        assert!(filter.contains("handlebars=info"), "filter: {}", filter);
        assert_eq!(default_filter(false).to_string(), "warn");
    }
}
