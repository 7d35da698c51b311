//! Diagnostic logging.
//!
//! Stdout is reserved for the response document, so everything goes to
//! stderr. The filter comes from the caller rather than `RUST_LOG`.

use tracing_subscriber::{filter::ParseError, EnvFilter};

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Installs a stderr subscriber filtered by `directives` (e.g. `warn` or
/// `kubefetch=debug`).
pub fn init(directives: &str) -> Result<(), ParseError> {
    let filter = EnvFilter::try_new(directives)?;

    let result = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init();

    // A subscriber may already be installed, e.g. by a test harness.
    if result.is_err() {
        tracing::debug!("tracing subscriber already initialized");
    }
    Ok(())
}
