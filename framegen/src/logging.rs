//! Diagnostic tracing for the generator.
//!
//! Tracing output is for debugging only and goes to stderr. The run summary
//! printed on stdout is product output and is unaffected by `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset, so config fallbacks are
/// still reported.
///
/// # Example
/// ```bash
/// RUST_LOG=framegen=debug framegen --dry-run
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
