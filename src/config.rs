//! Configuration management for the session service.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::net::IpAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api::ServerConfig;
use crate::cli::Args;
use crate::error::WuiError;
use crate::hosts::{HostRecord, StaticHostDirectory};
use crate::session::ConfigurationProvider;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerSection,
    /// Session default values.
    pub defaults: DefaultsSection,
    /// Known segment database hosts.
    pub hosts: HostsSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Sessions idle longer than this are dropped. Zero disables expiry.
    pub session_idle_secs: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            session_idle_secs: 3600,
        }
    }
}

/// Statically configured session defaults.
///
/// A value set to `null` in the file is unavailable, and seeding a session
/// that lacks the key fails with `ConfigurationUnavailable`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsSection {
    /// Whether flag history is included by default.
    pub include_history: Option<bool>,
    /// Default flag combination option.
    pub choose_flag_option: Option<String>,
}

impl Default for DefaultsSection {
    fn default() -> Self {
        Self {
            include_history: Some(false),
            choose_flag_option: Some("AND".to_string()),
        }
    }
}

impl ConfigurationProvider for DefaultsSection {
    fn include_history_default(&self) -> crate::Result<bool> {
        self.include_history
            .ok_or_else(|| WuiError::ConfigurationUnavailable("include_history".into()))
    }

    fn choose_flag_option_default(&self) -> crate::Result<String> {
        self.choose_flag_option
            .clone()
            .ok_or_else(|| WuiError::ConfigurationUnavailable("choose_flag_option".into()))
    }
}

/// Host directory section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostsSection {
    /// Host used when the user has not chosen one.
    pub default_host_id: i64,
    /// Default output format for query results.
    pub default_output_format: String,
    /// Known hosts.
    pub hosts: Vec<HostRecord>,
}

impl Default for HostsSection {
    fn default() -> Self {
        Self {
            default_host_id: 0,
            default_output_format: "json".to_string(),
            hosts: vec![HostRecord::new(0, "unauthenticated")],
        }
    }
}

impl HostsSection {
    pub fn to_directory(&self) -> StaticHostDirectory {
        StaticHostDirectory::new(
            self.default_host_id,
            self.default_output_format.clone(),
            self.hosts.clone(),
        )
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace) or a full filter directive.
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("DQSEGDB_WUI_HOST") {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var("DQSEGDB_WUI_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }

        if let Ok(level) = std::env::var("DQSEGDB_WUI_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    ///
    /// Only options given on the command line override lower layers.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(host) = args.host {
            self.server.host = host.to_string();
        }

        if let Some(port) = args.port {
            self.server.port = port;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match args.config {
            Some(ref path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_env();
        config.apply_args(args);

        Ok(config)
    }

    /// Convert to ServerConfig for the API server.
    pub fn to_server_config(&self) -> Result<ServerConfig, ConfigError> {
        let host: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidHost(self.server.host.clone()))?;

        Ok(ServerConfig::new(host.to_string(), self.server.port)
            .with_session_idle_secs(self.server.session_idle_secs))
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// Invalid host address.
    InvalidHost(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
            Self::InvalidHost(host) => write!(f, "invalid host address: {}", host),
        }
    }
}

impl std::error::Error for ConfigError {}
