use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Install the stderr subscriber.
///
/// `RUST_LOG` wins when set. Otherwise only warnings are shown, or everything
/// from the wallet at debug level with `-v`.
pub fn init(verbose: bool) {
    let default_directives = if verbose {
        "warn,qrwalletapp=debug,qrwallet=debug"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let stderr_layer = fmt::layer()
        .with_target(verbose)
        .with_level(true)
        .without_time()
        .with_writer(std::io::stderr);

    // A subscriber may already be installed (e.g. by a test harness).
    let _ = registry().with(env_filter).with(stderr_layer).try_init();
}
