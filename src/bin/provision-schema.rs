//! Schema provisioning binary
//!
//! Reads configuration from `CONFIG_PATH` (default `provisioner.toml`, optional)
//! with `SCHEMA_PROVISIONER__*` overrides, takes the API key from `WEAVIATE_KEY`,
//! and declares the configured collections. Exits non-zero on any failure.

use anyhow::Context;
use schema_provisioner::{
    config::Config,
    observability::init_observability,
    provisioner::Provisioner,
};
use secrecy::Secret;
use tracing::{error, info};

/// Environment variable holding the Weaviate API key
const API_KEY_VAR: &str = "WEAVIATE_KEY";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "provisioner.toml".to_string());
    let config = Config::from_file_with_env(&config_path)
        .with_context(|| format!("failed to load configuration from {}", config_path))?;

    init_observability(&config.logging);
    info!("Starting schema provisioning");
    info!("Configuration loaded and validated from {}", config_path);

    let api_key = std::env::var(API_KEY_VAR).ok().map(Secret::new);
    let provisioner = Provisioner::new(config.schema.clone(), config.provisioning.clone())?;

    match provisioner.provision(&config.connection, api_key).await {
        Ok(report) => {
            info!(created = ?report.created, skipped = ?report.skipped, "Schema provisioned");
            Ok(())
        }
        Err(e) => {
            error!("Schema provisioning failed: {}", e);
            Err(e.into())
        }
    }
}
