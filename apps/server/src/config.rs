//! Server configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `SCHOOLCARE__SECTION__KEY` environment variables (a `.env` file is read
//! first when present).

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use crate::error::{Error, Result};

const ENV_PREFIX: &str = "SCHOOLCARE";
const ENV_SEPARATOR: &str = "__";
const DEFAULT_CONFIG_FILE: &str = "config";
const ROTATIONS: &[&str] = &["daily", "hourly", "minutely", "never"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub store: StoreConfig,
    pub identity: IdentityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level for this workspace's crates. `RUST_LOG` takes precedence.
    pub level: String,
    pub json: bool,
    pub file_enabled: bool,
    pub file_directory: String,
    pub file_prefix: String,
    /// One of `daily`, `hourly`, `minutely`, `never`.
    pub file_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_enabled: false,
            file_directory: "logs".to_string(),
            file_prefix: "schoolcare".to_string(),
            file_rotation: "daily".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file of `{ "<collection>": [documents...] }` loaded at startup.
    pub seed_path: Option<String>,
}

/// Headers set by the authentication layer in front of this service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub role_header: String,
    pub id_header: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            role_header: "x-user-role".to_string(),
            id_header: "x-user-id".to_string(),
        }
    }
}

impl Config {
    /// Load from `config.toml` (if present) and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load with an explicit config file, which must then exist.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        // A missing .env file is not an error.
        let _ = dotenvy::dotenv();

        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| Error::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(Error::Config("server.host must not be empty".into()));
        }
        if self.server.port == 0 {
            return Err(Error::Config("server.port must be non-zero".into()));
        }
        if !ROTATIONS.contains(&self.logging.file_rotation.as_str()) {
            return Err(Error::Config(format!(
                "logging.file_rotation must be one of {}, got '{}'",
                ROTATIONS.join(", "),
                self.logging.file_rotation
            )));
        }
        if self.identity.role_header.trim().is_empty() || self.identity.id_header.trim().is_empty()
        {
            return Err(Error::Config("identity header names must not be empty".into()));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|e| Error::Config(format!("invalid server.host '{}': {e}", self.server.host)))?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}
