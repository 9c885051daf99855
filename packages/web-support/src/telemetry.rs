//! Process-wide JSON logging for the HTTP apps.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the JSON subscriber. `RUST_LOG` wins over `default_directives`.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(service: &'static str, default_directives: &str) -> Result<(), TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let fmt_layer = fmt::layer()
        .json()
        .with_target(false)
        .with_ansi(false)
        .with_current_span(true)
        .with_span_list(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(service, "telemetry initialised");
    Ok(())
}
