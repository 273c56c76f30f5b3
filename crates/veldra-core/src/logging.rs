//! Logging initialization for binaries and examples.

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. Call once at startup.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug,glow=info".into()),
        )
        .init();
    tracing::debug!("logging initialized");
}
