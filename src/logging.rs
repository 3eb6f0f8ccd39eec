//! Diagnostic logging setup.
//!
//! Stdout belongs to the launcher feedback document, so logs always go to
//! stderr. The filter comes from `RUST_LOG` and falls back to `warn`, or to
//! `debug` when verbose output is requested.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "bear_search=debug";

/// Installs the global `tracing` subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
