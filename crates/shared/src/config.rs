//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Destination catalog overrides.
    #[serde(default)]
    pub region: RegionConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "sppd=info,sea_orm=warn".to_string()
}

/// Destination catalog overrides.
///
/// When a list is absent the built-in West Nusa Tenggara catalog is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionConfig {
    /// Destinations valid for within-region travel.
    pub within_region: Option<Vec<String>>,
    /// Destinations valid for out-of-region travel.
    pub out_of_region: Option<Vec<String>>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SPPD").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_fill_optional_sections() {
        let config = config::Config::builder()
            .set_override("database.url", "postgres://localhost/sppd")
            .unwrap()
            .build()
            .unwrap();

        let app: AppConfig = config.try_deserialize().unwrap();

        assert_eq!(app.database.url, "postgres://localhost/sppd");
        assert_eq!(app.database.max_connections, 10);
        assert_eq!(app.database.min_connections, 1);
        assert_eq!(app.logging.filter, "sppd=info,sea_orm=warn");
        assert!(app.region.within_region.is_none());
        assert!(app.region.out_of_region.is_none());
    }

    #[test]
    fn test_config_missing_database_url_fails() {
        let config = config::Config::builder().build().unwrap();
        let result: Result<AppConfig, _> = config.try_deserialize();
        assert!(result.is_err());
    }
}
