use tracing_subscriber::EnvFilter;

/// JSON logs filtered by `RUST_LOG`, `info` when unset.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // keep ANSI color codes out of collected log files.
        .with_ansi(false)
        .json()
        .init();
}
