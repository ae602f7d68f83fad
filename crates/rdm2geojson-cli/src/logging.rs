use rdm2geojson_core::LogLevel;
use tracing_subscriber::{fmt, EnvFilter};

/// Builds the filter for `level`; `RUST_LOG` wins when set and valid.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()))
}

/// Installs the global subscriber. Logs go to stderr so stdout stays clean.
pub fn init(level: LogLevel) {
    fmt()
        .with_env_filter(env_filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
