//! Configuration loading

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub mirror: MirrorSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

/// Upstream API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the upstream API
    #[serde(default = "default_upstream_url")]
    pub url: String,
    /// Path probed by the health monitor
    #[serde(default = "default_probe_path")]
    pub probe_path: String,
    /// Seconds between health probes
    #[serde(default = "default_check_interval")]
    pub check_interval_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_upstream_url(),
            probe_path: default_probe_path(),
            check_interval_secs: default_check_interval(),
        }
    }
}

/// Decision engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorSettings {
    /// Page size injected into GETs without a `per_page` param
    #[serde(default = "default_per_page")]
    pub per_page: usize,
    /// Upstream request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Status code synthesized while the upstream is offline
    #[serde(default = "default_offline_status")]
    pub offline_status: u16,
}

impl Default for MirrorSettings {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            timeout_secs: default_timeout(),
            offline_status: default_offline_status(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_upstream_url() -> String {
    "https://api.github.com".to_string()
}

fn default_probe_path() -> String {
    "/".to_string()
}

fn default_check_interval() -> u64 {
    30
}

fn default_per_page() -> usize {
    100
}

fn default_timeout() -> u64 {
    10
}

fn default_offline_status() -> u16 {
    504
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &str) -> Result<Self> {
        let config_path = Path::new(path);

        if !config_path.exists() {
            info!("Config file not found at {}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        info!("Loaded configuration from {}", path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.upstream.url, "https://api.github.com");
        assert_eq!(config.mirror.per_page, 100);
        assert_eq!(config.mirror.offline_status, 504);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [upstream]
            url = "https://api.example.com"

            [mirror]
            per_page = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.url, "https://api.example.com");
        assert_eq!(config.mirror.per_page, 50);
        assert_eq!(config.mirror.timeout_secs, 10);
        assert_eq!(config.server.bind_address, "0.0.0.0");
    }
}
