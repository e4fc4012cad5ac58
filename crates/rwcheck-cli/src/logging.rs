//! Logging setup
//!
//! Everything goes to stderr: stdout is reserved for the single status line
//! the scheduler parses.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set
    pub default_filter: String,
    /// Whether to include file/line information in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_filter: "warn".to_string(),
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Verbose configuration for interactive troubleshooting
    pub fn debug() -> Self {
        Self {
            default_filter: "debug,mysql_async=info".to_string(),
            include_location: true,
        }
    }
}

/// Initialize the logging system with the given configuration
pub fn init(config: LoggingConfig) -> anyhow::Result<()> {
    // RUST_LOG takes precedence over the default filter
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}
