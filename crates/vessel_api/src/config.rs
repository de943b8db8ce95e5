//! Server configuration loaded from TOML with per-field defaults.

use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration. Every field may be omitted from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,

    /// SQLite file; `None` keeps the registry in memory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Rolling log file directory; `None` logs to stderr.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Insert the sample fleet into an empty registry at startup.
    #[serde(default)]
    pub seed_sample_data: bool,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT))
}

fn default_log_level() -> String {
    vessel_core::default_log_level().to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            database_path: None,
            log_level: default_log_level(),
            log_dir: None,
            seed_sample_data: false,
        }
    }
}

impl ApiConfig {
    /// Reads a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ApiConfig::default();
        assert_eq!(
            config.bind_addr,
            "127.0.0.1:5080".parse::<SocketAddr>().unwrap()
        );
        assert!(config.database_path.is_none());
        assert!(config.log_dir.is_none());
        assert!(!config.seed_sample_data);
        assert_eq!(config.log_level, vessel_core::default_log_level());
    }

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(ApiConfig::from_toml("").unwrap(), ApiConfig::default());
    }

    #[test]
    fn partial_file_overrides_named_fields() {
        let config = ApiConfig::from_toml(
            r#"
            bind_addr = "0.0.0.0:8080"
            database_path = "/var/lib/vessel/registry.db"
            seed_sample_data = true
            "#,
        )
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(
            config.database_path,
            Some(PathBuf::from("/var/lib/vessel/registry.db"))
        );
        assert!(config.seed_sample_data);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn malformed_file_is_rejected() {
        let err = ApiConfig::from_toml("bind_addr = 5").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ApiConfig::load("/nonexistent/vessel-api.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/vessel-api.toml"));
    }
}
