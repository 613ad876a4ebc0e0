//! Logging and tracing configuration
//!
//! The binary logs to stderr. Test processes route library logs through
//! the libtest writer so they are captured per test.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing for the CLI (stderr logging)
///
/// Logs are controlled by the `RUST_LOG` environment variable.
/// Default level is INFO for this crate, WARN for dependencies.
pub fn init_cli() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bdd=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// Initialize tracing inside a test process
///
/// Quiet unless `RUST_LOG` asks for more. Safe to call from every test:
/// only the first call installs a subscriber.
pub fn init_test() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bdd=warn,warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .try_init();
}
