use tracing_subscriber::EnvFilter;

/// Overrides the log filter (same syntax as `RUST_LOG`).
pub const LOG_ENV: &str = "CCENV_LOG";

/// Install the global subscriber. Logs go to stderr so stdout belongs to
/// the forwarded command.
pub fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level(debug)));

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .try_init();
}

fn default_level(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "warn"
    }
}
