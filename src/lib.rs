//! Schema Provisioner - declares Weaviate collections over a scoped connection
//!
//! The provisioner opens a connection to a Weaviate instance, creates the
//! collections of a [`schema::SchemaPlan`] in order, and closes the connection
//! on every exit path, including failed requests.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use schema_provisioner::prelude::*;
//! use secrecy::Secret;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::default_config();
//!     let api_key = std::env::var("WEAVIATE_KEY").ok().map(Secret::new);
//!
//!     let provisioner = Provisioner::new(SchemaPlan::jeopardy(), config.provisioning)?;
//!     let report = provisioner.provision(&config.connection, api_key).await?;
//!     println!("created: {:?}", report.created);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod observability;
pub mod provisioner;
pub mod schema;

pub use config::Config;
pub use error::{ProvisionError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::client::{SchemaClient, WeaviateClient};
    pub use crate::config::{Config, ConnectionConfig, ProvisioningConfig};
    pub use crate::error::{ConnectionError, ProvisionError, Result, SchemaError};
    pub use crate::provisioner::{with_connection, ProvisionReport, Provisioner};
    pub use crate::schema::{CollectionSpec, DataType, PropertySpec, ReferenceSpec, SchemaPlan};
}
