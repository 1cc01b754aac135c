use serde::Deserialize;

use crate::infrastructure::cache::CacheConfig;
use crate::infrastructure::observability::ObservabilityConfig;
use crate::infrastructure::storage::StorageSettings;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load `config/default`, then `config/local`, then `APP__*` environment
    /// variables. `DATABASE_URL` overrides the configured store URL.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: Self = config.try_deserialize()?;

        if let Ok(url) = std::env::var("DATABASE_URL") {
            app_config.storage.postgres.url = url;
        }

        Ok(app_config)
    }

    /// Like `load`, but falls back to defaults and hands back the error so
    /// the caller can report it once logging is up.
    pub fn load_or_default() -> (Self, Option<config::ConfigError>) {
        match Self::load() {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.cache.max_capacity, 100);
        assert_eq!(config.cache.time_to_idle_secs, 3600);
    }

    #[test]
    fn test_deserialize_from_layered_source() {
        let source = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [server]
                host = "127.0.0.1"
                port = 9000

                [logging]
                level = "debug"
                format = "json"

                [storage]
                backend = "memory"

                [cache]
                max_capacity = 10
                single_flight = true
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: AppConfig = source.try_deserialize().unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.cache.max_capacity, 10);
        assert!(config.cache.single_flight);
        assert!(!config.cache.detached_fetch);
        assert!(config.observability.metrics.enabled);
    }

    #[test]
    fn test_partial_sections_keep_other_fields() {
        let source = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [server]
                port = 9000

                [logging]
                format = "json"

                [storage]
                backend = "memory"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: AppConfig = source.try_deserialize().unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.storage.backend, "memory");
    }
}
