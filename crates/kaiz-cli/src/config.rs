//! Configuration management for the kaiz CLI

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub profile: String,
    pub enabled: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `kaiz.toml` and `KAIZ_*` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("kaiz")
    }

    fn load_from(file: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("database.path", "data.db")?
            .set_default("logging.profile", "development")?
            .set_default("logging.enabled", false)?
            // Optional file next to where the tool is run
            .add_source(File::with_name(file).required(false))
            // KAIZ_DATABASE_PATH, KAIZ_LOGGING_PROFILE, KAIZ_LOGGING_ENABLED
            .add_source(
                Environment::with_prefix("KAIZ")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
