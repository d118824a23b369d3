//! Configuration validation

use super::*;
use crate::error::{ProvisionError, Result};

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_connection_config(&config.connection)?;
    validate_logging_config(&config.logging)?;
    config.schema.validate()?;
    Ok(())
}

/// Validate connection configuration
fn validate_connection_config(config: &ConnectionConfig) -> Result<()> {
    validate_host("HTTP", &config.http_host)?;
    validate_host("gRPC", &config.grpc_host)?;

    if config.http_port == 0 {
        return Err(ProvisionError::Config(
            "HTTP port cannot be 0".to_string()
        ));
    }

    if config.grpc_port == 0 {
        return Err(ProvisionError::Config(
            "gRPC port cannot be 0".to_string()
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ProvisionError::Config(
            "Connection timeout must be greater than 0".to_string()
        ));
    }

    if config.timeout_secs > 300 {
        return Err(ProvisionError::Config(
            "Connection timeout too large (max: 300 seconds)".to_string()
        ));
    }

    Ok(())
}

fn validate_host(label: &str, host: &str) -> Result<()> {
    if host.trim().is_empty() {
        return Err(ProvisionError::Config(
            format!("{} host cannot be empty", label)
        ));
    }

    // Scheme comes from the secure flag, not the host
    if host.contains("://") || host.contains('/') {
        return Err(ProvisionError::Config(
            format!("{} host must be a bare host name, got {}", label, host)
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ProvisionError::Config(
            "Log level cannot be empty".to_string()
        ));
    }

    match config.format.as_str() {
        "json" | "pretty" | "compact" => Ok(()),
        other => Err(ProvisionError::Config(
            format!("Unknown log format: {} (expected json, pretty or compact)", other)
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = Config::default_config();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_host() {
        let mut config = Config::default_config();
        config.connection.grpc_host = "  ".to_string();

        assert!(validate_connection_config(&config.connection).is_err());
    }

    #[test]
    fn test_host_with_scheme() {
        let mut config = Config::default_config();
        config.connection.http_host = "http://localhost".to_string();

        assert!(validate_connection_config(&config.connection).is_err());
    }

    #[test]
    fn test_zero_port() {
        let mut config = Config::default_config();
        config.connection.http_port = 0;

        assert!(validate_connection_config(&config.connection).is_err());
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = Config::default_config();
        config.connection.timeout_secs = 0;

        assert!(validate_connection_config(&config.connection).is_err());
    }

    #[test]
    fn test_unknown_log_format() {
        let mut config = Config::default_config();
        config.logging.format = "xml".to_string();

        assert!(validate_logging_config(&config.logging).is_err());
    }

    #[test]
    fn test_invalid_schema_is_rejected() {
        let mut config = Config::default_config();
        config.schema.collections.reverse();

        assert!(validate_config(&config).is_err());
    }
}
