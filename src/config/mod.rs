//! Configuration management for the schema provisioner

use crate::schema::SchemaPlan;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod loader;
pub mod validation;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub connection: ConnectionConfig,

    #[serde(default)]
    pub provisioning: ProvisioningConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Collections to declare, in creation order
    #[serde(default)]
    pub schema: SchemaPlan,
}

/// Endpoint settings for the Weaviate service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Host serving the REST API
    #[serde(default = "default_host")]
    pub http_host: String,

    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Use https for the REST API
    #[serde(default)]
    pub http_secure: bool,

    /// Host serving the gRPC API
    #[serde(default = "default_host")]
    pub grpc_host: String,

    #[serde(default = "default_grpc_port")]
    pub grpc_port: u16,

    #[serde(default)]
    pub grpc_secure: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Provisioning behaviour
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvisioningConfig {
    /// Skip collections that already exist instead of failing on them
    #[serde(default)]
    pub skip_existing: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String { "localhost".to_string() }
fn default_http_port() -> u16 { 8080 }
fn default_grpc_port() -> u16 { 50051 }
fn default_timeout() -> u64 { 30 }
fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            http_host: default_host(),
            http_port: default_http_port(),
            http_secure: false,
            grpc_host: default_host(),
            grpc_port: default_grpc_port(),
            grpc_secure: false,
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ConnectionConfig {
    /// Base URL of the REST API
    pub fn http_url(&self) -> String {
        let scheme = if self.http_secure { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.http_host, self.http_port)
    }

    /// Address of the gRPC API
    pub fn grpc_url(&self) -> String {
        let scheme = if self.grpc_secure { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.grpc_host, self.grpc_port)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::error::Result<Self> {
        let config = loader::load_config(path)?;
        validation::validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn from_file_with_env<P: AsRef<Path>>(path: P) -> crate::error::Result<Self> {
        let config = loader::load_config_with_env(path)?;
        validation::validate_config(&config)?;
        Ok(config)
    }

    /// Validate this configuration
    pub fn validate(&self) -> crate::error::Result<()> {
        validation::validate_config(self)
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Self::default()
    }
}
