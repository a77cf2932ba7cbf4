use tracing_subscriber::EnvFilter;

/// Log to stderr at INFO, or DEBUG with `--debug`. `RUST_LOG` wins over both.
pub fn init(debug: bool) -> tracing::Level {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    level
}
