//! Tracing setup.

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use crate::config::LoggingConfig;

/// Initializes tracing from config. `RUST_LOG` overrides the configured
/// level when set; `format = "json"` switches to structured output.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    if config.format == "json" {
        builder.json().with_current_span(true).init();
    } else {
        builder.pretty().init();
    }
}
