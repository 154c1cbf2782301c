use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured stdout tracing for `service`. Call once at startup.
///
/// JSON lines, filtered by `RUST_LOG` with an `info` fallback when the env
/// var is unset. Safe to call multiple times — subsequent calls are silently
/// ignored.
pub fn init_tracing(service: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let initialized = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .try_init()
        .is_ok();
    if initialized {
        tracing::info!(service, "tracing initialized");
    }
}
