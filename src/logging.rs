use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive (e.g. `bb_pool=debug`).
pub const LOG_ENV: &str = "BB_POOL_LOG";

/// Initialize stderr logging.
///
/// `BB_POOL_LOG` wins when set; otherwise `--verbose` selects `debug`, else `warn`.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "bb_pool=debug"
    } else {
        "warn"
    }
}
