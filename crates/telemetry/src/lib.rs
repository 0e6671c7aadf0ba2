//! Tracing subscriber bootstrap.

use anyhow::Context;
use dbseed_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber, writing to stderr so stdout stays
/// free for command output. `RUST_LOG` wins over the configured filter.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.filter)
            .with_context(|| format!("invalid log filter '{}'", settings.filter))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = match settings.log_format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    // A subscriber may already be installed (tests, embedding).
    if installed.is_err() {
        tracing::debug!(target: "dbseed-telemetry", "tracing subscriber already installed");
    }

    tracing::debug!(
        target: "dbseed-telemetry",
        format = ?settings.log_format,
        "telemetry initialized"
    );
    Ok(())
}
