use tracing_subscriber::EnvFilter;

/// Set up the global subscriber for an icspipe run.
///
/// `RUST_LOG` takes precedence over `--log-level` (e.g.
/// `RUST_LOG=icspipe_core=debug` to trace every stage). Stage and chain
/// messages go to stderr; the included/rejected counts stay alone on stdout.
pub fn init(log_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
