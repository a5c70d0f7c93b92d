//! Configuration module
//!
//! `AppConfig` is read from a TOML file; every section and key is optional.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! shutdown_timeout = 10
//!
//! [database]
//! path = "./stables.db"
//! # url = "sqlite:///var/lib/stables/stables.db?mode=rwc"
//! max_connections = 5
//!
//! [logging]
//! level = "info"
//! format = "text"   # or "json"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::infrastructure::DatabaseConfig;
use crate::shared::errors::InfraError;

/// Environment variable that overrides the config file location
pub const CONFIG_ENV: &str = "STABLES_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 10,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite file, used when `url` is not set
    pub path: String,
    /// Full connection URL, wins over `path`
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "./stables.db".to_string(),
            url: None,
            max_connections: 5,
        }
    }
}

impl DatabaseSettings {
    pub fn connection_url(&self) -> String {
        match &self.url {
            Some(url) if !url.trim().is_empty() => url.clone(),
            _ => format!("sqlite://{}?mode=rwc", self.path),
        }
    }

    pub fn to_database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.connection_url(),
            max_connections: self.max_connections,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, InfraError> {
        Ok(toml::from_str(raw)?)
    }
}

/// `$STABLES_CONFIG`, else `<config_dir>/stable-registry/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Ok(p) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(p);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stable-registry")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.address(), "0.0.0.0:8080");
        assert_eq!(cfg.logging.format, "text");
        assert_eq!(cfg.database.connection_url(), "sqlite://./stables.db?mode=rwc");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            port = 9100

            [database]
            url = "sqlite::memory:"
            max_connections = 1
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.server.shutdown_timeout, 10);
        let db = cfg.database.to_database_config();
        assert_eq!(db.url, "sqlite::memory:");
        assert_eq!(db.max_connections, 1);
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        let err = AppConfig::from_toml("[server\nport = ").unwrap_err();
        assert!(matches!(err, InfraError::Config(_)));
    }

    #[test]
    fn missing_file_is_default() {
        let cfg = AppConfig::load(Path::new("/nonexistent/stable-registry.toml")).unwrap();
        assert_eq!(cfg.logging.level, "info");
    }
}
