use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` when `verbose`.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // `try_init` only fails if a subscriber was already set. Ignore that case
    // so tests can call `init` more than once.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
