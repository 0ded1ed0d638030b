//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::insights::thresholds::{InsightThresholds, SnapshotThresholds};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub estimator: EstimatorConfig,

    /// Rolling-window insight thresholds
    #[serde(default)]
    pub thresholds: InsightThresholds,

    /// Single-day snapshot thresholds
    #[serde(default)]
    pub snapshot: SnapshotThresholds,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8088
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Estimation backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EstimatorConfig {
    /// Backend to use: "keyword" (built-in) or "remote"
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Base URL of the remote estimation service
    #[serde(default = "default_estimator_url")]
    pub url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_estimator_timeout")]
    pub request_timeout_ms: u64,
}

fn default_backend() -> String {
    "keyword".to_string()
}

fn default_estimator_url() -> String {
    "http://localhost:8090".to_string()
}

fn default_estimator_timeout() -> u64 {
    5000
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            url: default_estimator_url(),
            request_timeout_ms: default_estimator_timeout(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("attune").join("config.toml")),
            Some(PathBuf::from("/etc/attune/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // API overrides
        if let Ok(host) = std::env::var("ATTUNE_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("ATTUNE_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Estimator overrides
        if let Ok(backend) = std::env::var("ATTUNE_ESTIMATOR_BACKEND") {
            self.estimator.backend = backend;
        }
        if let Ok(url) = std::env::var("ATTUNE_ESTIMATOR_URL") {
            self.estimator.url = url;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("ATTUNE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("ATTUNE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Attune Configuration
#
# Environment variables override these settings:
# - ATTUNE_API_HOST
# - ATTUNE_API_PORT
# - ATTUNE_ESTIMATOR_BACKEND
# - ATTUNE_ESTIMATOR_URL
# - ATTUNE_LOG_LEVEL
# - ATTUNE_LOG_FORMAT

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8088

# Allowed CORS origins
cors_origins = ["http://localhost:3000", "http://127.0.0.1:3000"]

# Request timeout in seconds
request_timeout_secs = 30

[estimator]
# Estimation backend: "keyword" (built-in heuristics) or "remote"
backend = "keyword"

# Remote estimation service URL (only used when backend = "remote")
url = "http://localhost:8090"

# Request timeout in milliseconds
request_timeout_ms = 5000

[thresholds]
# Rolling-window insight thresholds. Omitted keys use built-in defaults.
# water_low = 50.0
# water_high = 80.0
# movement_high = 30.0
# movement_low = 15.0
# sleep_high = 3.5
# sleep_low = 2.5
# stress_high = 3.0
# cravings_high = 2.0

[snapshot]
# Single-day snapshot thresholds. Omitted keys use built-in defaults.
# water_low = 40.0
# water_high = 80.0
# protein_high = 60.0
# fiber_high = 25.0
# movement_high = 30.0
# sleep_low = 3.0
# stress_high = 3.0
# cravings_high = 3

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/attune/attune.log"
"#
    .to_string()
}
