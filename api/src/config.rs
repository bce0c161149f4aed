//! Configuration loading and logger setup for the API binary

use sb_shared::config::{AppConfig, Environment, LogFormat, LoggingConfig};

/// Load `.env` files and build the application configuration
///
/// Process environment wins over `.env.<environment>`, which wins over `.env`.
pub fn load_config() -> AppConfig {
    let environment = Environment::from_env();
    dotenv::from_filename(environment.env_file()).ok();
    dotenv::dotenv().ok();
    AppConfig::from_env()
}

/// Initialize `env_logger` with the configured level as default filter
///
/// `RUST_LOG` still takes precedence when set.
pub fn init_logging(logging: &LoggingConfig) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::new().default_filter_or(logging.level.as_str()),
    );

    if !logging.timestamp {
        builder.format_timestamp(None);
    }
    if logging.format == LogFormat::Compact {
        builder.format_module_path(false).format_target(false);
    }

    if let Err(e) = builder.try_init() {
        eprintln!("Logger already initialized: {}", e);
    }
}
