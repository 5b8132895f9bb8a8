use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber, filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once: a warm function instance keeps its first
/// subscriber.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Vercel captures stdout/stderr, so no file output and no colours
    let console = fmt::layer().with_ansi(false).with_target(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .try_init();
}
