use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;
use crate::geo::Coordinate;
use crate::map::{MAX_ZOOM, MIN_ZOOM};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/voicemap/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("voicemap").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from an explicit path.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Service URLs are absolute http(s) URLs
    /// - Timeouts are non-zero
    /// - Initial zoom is within the map's zoom range
    /// - Initial center and fixed position are valid coordinates
    /// - Server bind address parses
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("intent.endpoint", &self.intent.endpoint)?;
        validate_url("geocode.base_url", &self.geocode.base_url)?;

        if self.intent.timeout_seconds == 0 {
            return Err(invalid("intent.timeout_seconds must be greater than 0"));
        }
        if self.geocode.timeout_seconds == 0 {
            return Err(invalid("geocode.timeout_seconds must be greater than 0"));
        }

        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.map.initial_zoom) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "map.initial_zoom {} outside {}..={}",
                    self.map.initial_zoom, MIN_ZOOM, MAX_ZOOM
                ),
            });
        }

        if Coordinate::checked(self.map.initial_latitude, self.map.initial_longitude).is_none() {
            return Err(invalid("map initial center is not a valid coordinate"));
        }

        if let Some(position) = &self.position {
            if Coordinate::checked(position.latitude, position.longitude).is_none() {
                return Err(invalid("position is not a valid coordinate"));
            }
        }

        if self.server.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::ValidationError {
                message: format!("server.bind_addr '{}' is not host:port", self.server.bind_addr),
            });
        }

        Ok(())
    }
}

fn validate_url(field: &str, value: &str) -> Result<(), ConfigError> {
    match reqwest::Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        Ok(url) => Err(ConfigError::ValidationError {
            message: format!("{} has unsupported scheme '{}'", field, url.scheme()),
        }),
        Err(e) => Err(ConfigError::ValidationError {
            message: format!("{} '{}' is not a valid URL: {}", field, value, e),
        }),
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::ValidationError {
        message: message.to_string(),
    }
}
