//! Administrative API of the schema service

pub mod models;
pub mod weaviate;

pub use models::{WeaviateClass, WeaviateProperty};
pub use weaviate::WeaviateClient;

use crate::error::Result;
use crate::schema::CollectionSpec;
use async_trait::async_trait;

/// Schema operations consumed by the provisioner
#[async_trait]
pub trait SchemaClient: Send + Sync {
    /// Check whether a collection with this name exists
    async fn collection_exists(&self, name: &str) -> Result<bool>;

    /// Create a collection with its properties and references
    async fn create_collection(&self, collection: &CollectionSpec) -> Result<()>;

    /// Release the connection. Calling it again is a no-op.
    async fn close(&self) -> Result<()>;
}
