//! Tracing subscriber setup.

use status_config::LogFormat;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` takes precedence over
/// `log_level` when set.
pub fn setup_tracing(log_level: &str, format: LogFormat) -> anyhow::Result<()> {
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

	let registry = tracing_subscriber::registry().with(env_filter);

	match format {
		LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
		LogFormat::Json => registry
			.with(
				fmt::layer()
					.json()
					.with_current_span(true)
					.with_span_list(false),
			)
			.try_init(),
	}
	.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}
