// src/logger.rs
#[cfg(feature = "with-logs")]
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();
}

#[cfg(not(feature = "with-logs"))]
pub fn init_logger() {
    // Logging compiled out.
}
