//! Logging setup.
//!
//! Library code only emits through `tracing`; binaries and tests opt into output here.

use tracing_subscriber::EnvFilter;

/// Default filter: verbose for bobpop itself, quiet for everything else.
pub const DEFAULT_FILTER: &str = "info,bobpop=debug,bobpop_core=debug";

/// Install a fmt subscriber honouring `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Install a fmt subscriber with an explicit filter directive, e.g. `"bobpop=trace"`.
pub fn init_with_filter(directives: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_test_writer()
        .try_init();
}
