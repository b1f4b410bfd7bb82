use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use crate::error::{ApiError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "pantheon.toml";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback filter directive when `RUST_LOG` is unset
    pub level: Option<String>,
    /// Directory for the rotating JSON log file; console only when unset
    pub log_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetricsConfig {
    pub addr: Option<String>,
}

impl Config {
    /// Load configuration from `path`, or from `pantheon.toml` when present.
    ///
    /// An explicitly given path must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (config_path, required) = match path {
            Some(p) => (p, true),
            None => (Path::new(DEFAULT_CONFIG_PATH), false),
        };

        if !required && !config_path.exists() {
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path).map_err(|e| {
            ApiError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Apply a `PORT`-style override. Empty values are ignored.
    pub fn apply_port_env(&mut self, value: Option<String>) -> Result<()> {
        if let Some(raw) = value.filter(|v| !v.trim().is_empty()) {
            self.server.port = raw
                .trim()
                .parse()
                .map_err(|_| ApiError::Config(format!("Invalid PORT value '{}'", raw)))?;
        }
        Ok(())
    }

    /// Layer runtime overrides on top of the loaded file.
    ///
    /// Precedence, lowest first: defaults, config file, `PORT`, CLI flags.
    pub fn apply_overrides(
        &mut self,
        port_env: Option<String>,
        cli_port: Option<u16>,
        cli_metrics_addr: Option<String>,
    ) -> Result<()> {
        self.apply_port_env(port_env)?;
        if let Some(port) = cli_port {
            self.server.port = port;
        }
        if cli_metrics_addr.is_some() {
            self.metrics.addr = cli_metrics_addr;
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        Ok(addr.parse()?)
    }
}
