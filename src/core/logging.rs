//! Logging initialization and utilities

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable.
///
/// # Example
/// ```
/// terrascape::core::logging::init();
/// log::info!("Generator started");
/// ```
pub fn init() {
    builder().init();
}

/// Like [`init`], but tolerates a logger that is already installed.
/// Returns false if another logger was set first.
pub fn try_init() -> bool {
    builder().try_init().is_ok()
}

fn builder() -> env_logger::Builder {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    );
    builder.format_timestamp_millis();
    builder
}
