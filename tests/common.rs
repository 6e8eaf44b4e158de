// tests/common.rs
//! Log capture for the integration tests

#[cfg(feature = "logging")]
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Route `tracing` output through the test harness, filtered by `RUST_LOG`
///
/// Every test binary that declares `mod common` calls this at least once.
pub fn setup() {
    #[cfg(feature = "logging")]
    {
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_test_writer())
            .with(EnvFilter::from_default_env())
            .try_init();
    }
}
