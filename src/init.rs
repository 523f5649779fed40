// Logging/tracing setup.

/// Initialize tracing. Level priority: CLI flag, then STACKFORM_LOG_LEVEL,
/// then "info". Safe to call more than once.
pub fn init_tracing(level: Option<&str>) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = level
        .map(str::to_string)
        .or_else(|| std::env::var("STACKFORM_LOG_LEVEL").ok())
        .unwrap_or_else(|| "info".to_string());

    let env_filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    // Ignore the error if a subscriber is already set (idempotent)
    let _ = tracing::subscriber::set_global_default(registry.with(fmt::layer()));
}
