//! Configuration management for neolog transports.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`NEOLOG__TRANSPORT__` prefix)
//! 2. Config file (`neolog.toml`, `[transport]` section)
//! 3. Defaults
//!
//! Raw [`TransportOptions`] must pass [`TransportOptions::validate`] before a
//! transport can be built from them.

use serde::Deserialize;

use crate::error::ConfigurationError;

pub const DEFAULT_MIN_LEVEL: &str = "info";
pub const DEFAULT_NODE_LABEL: &str = "Log";

/// Transport options as supplied by the caller. Nothing is checked yet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransportOptions {
    /// Neo4j URI, e.g. `bolt://localhost:7687`.
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Threshold below which the host should not invoke the transport.
    #[serde(default)]
    pub min_level: Option<String>,

    /// Node label under which log entries are stored.
    #[serde(default)]
    pub node_label: Option<String>,

    /// Suppress the "logged" notification.
    #[serde(default)]
    pub silent: Option<bool>,

    #[serde(default)]
    pub max_connections: Option<u32>,

    #[serde(default)]
    pub fetch_size: Option<usize>,
}

impl TransportOptions {
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            username: Some(username.into()),
            password: Some(password.into()),
            ..Default::default()
        }
    }

    /// Load options from `<file_prefix>.toml` and the environment.
    ///
    /// A missing file or a missing `[transport]` section yields empty options,
    /// which then fail validation. Environment values stay strings until
    /// deserialized, so credentials like `007` are kept verbatim.
    pub fn load(file_prefix: &str) -> Result<Self, ConfigurationError> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(config::Environment::with_prefix("NEOLOG").separator("__"))
            .build()?;

        Self::from_config(&cfg)
    }

    /// Extract the `[transport]` section from an already built config.
    pub fn from_config(cfg: &config::Config) -> Result<Self, ConfigurationError> {
        match cfg.get::<TransportOptions>("transport") {
            Ok(opts) => Ok(opts),
            Err(config::ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Check required fields and fill defaults.
    pub fn validate(self) -> Result<ConnectionConfig, ConfigurationError> {
        let endpoint = required(self.endpoint, "endpoint")?;
        let username = required(self.username, "username")?;
        let password = required(self.password, "password")?;

        Ok(ConnectionConfig {
            endpoint,
            username,
            password,
            min_level: or_default(self.min_level, DEFAULT_MIN_LEVEL),
            node_label: or_default(self.node_label, DEFAULT_NODE_LABEL),
            silent: self.silent.unwrap_or(false),
            max_connections: self.max_connections.unwrap_or(16),
            fetch_size: self.fetch_size.unwrap_or(256),
        })
    }
}

/// Validated connection configuration. Immutable once built.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    endpoint: String,
    username: String,
    password: String,
    min_level: String,
    node_label: String,
    silent: bool,
    max_connections: u32,
    fetch_size: usize,
}

impl ConnectionConfig {
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn min_level(&self) -> &str {
        &self.min_level
    }

    pub fn node_label(&self) -> &str {
        &self.node_label
    }

    pub fn silent(&self) -> bool {
        self.silent
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }

    pub fn fetch_size(&self) -> usize {
        self.fetch_size
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ConfigurationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigurationError::MissingField(field)),
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
