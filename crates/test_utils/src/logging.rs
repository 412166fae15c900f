//! Tracing for tests
//!
//! Routes `tracing` output through the libtest capture so log lines only show
//! up for failing tests. Filter with `RUST_LOG`, e.g.
//! `RUST_LOG=domain_billing=debug`.

use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once per test binary
///
/// Safe to call from every test; later calls are no-ops.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_test_writer()
        .try_init();
}
