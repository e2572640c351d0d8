/// Initialize tracing for tests with a default configuration
///
/// Safe to call from every test; only the first call installs a subscriber.
/// `RUST_LOG` overrides the default filter.
pub fn init_test_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("textflow=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
