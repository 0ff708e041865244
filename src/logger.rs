//! logger.rs
//! Configuración del logger usando env_logger.

use log::LevelFilter;

pub fn init_logger() {
    // Default "info". sqlx queda en warn: loguea cada query en info.
    let log_env = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_env))
        .filter_module("sqlx", LevelFilter::Warn)
        .format_timestamp_secs()
        .init();
}
