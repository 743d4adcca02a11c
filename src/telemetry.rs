use tracing_subscriber::EnvFilter;

use crate::config::PointConfig;

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &PointConfig) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}
