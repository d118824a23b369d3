//! Error types for the schema provisioner

use thiserror::Error;

/// Result type alias for provisioner operations
pub type Result<T> = std::result::Result<T, ProvisionError>;

/// Main error type for the schema provisioner
#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors raised while opening, using or closing the service connection
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("API key credential is missing or empty")]
    MissingCredential,

    #[error("Invalid API key credential: {0}")]
    InvalidCredential(String),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Service unreachable: {0}")]
    Unreachable(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Connection already closed")]
    Closed,

    #[error("Unexpected response status {status}: {body}")]
    Unexpected { status: u16, body: String },
}

/// Errors raised by schema declaration requests
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Collection already exists: {0}")]
    CollectionExists(String),

    #[error("Invalid schema plan: {0}")]
    InvalidPlan(String),

    #[error("Collection {collection} rejected with status {status}: {body}")]
    Rejected {
        collection: String,
        status: u16,
        body: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProvisionError {
    /// True when the failure is a naming conflict on an existing collection
    pub fn is_conflict(&self) -> bool {
        matches!(self, ProvisionError::Schema(SchemaError::CollectionExists(_)))
    }
}

impl From<config::ConfigError> for ProvisionError {
    fn from(err: config::ConfigError) -> Self {
        ProvisionError::Config(err.to_string())
    }
}
