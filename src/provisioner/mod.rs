//! Schema provisioning inside a scoped connection

pub mod scope;

pub use scope::with_connection;

use crate::client::{SchemaClient, WeaviateClient};
use crate::config::{ConnectionConfig, ProvisioningConfig};
use crate::error::Result;
use crate::schema::SchemaPlan;
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Outcome of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionReport {
    /// Collections created, in creation order
    pub created: Vec<String>,

    /// Collections left alone because they already existed
    pub skipped: Vec<String>,
}

/// Declares the collections of a [`SchemaPlan`] in order
#[derive(Debug, Clone)]
pub struct Provisioner {
    plan: SchemaPlan,
    options: ProvisioningConfig,
}

impl Provisioner {
    /// Create a provisioner; the plan is validated up front
    pub fn new(plan: SchemaPlan, options: ProvisioningConfig) -> Result<Self> {
        plan.validate()?;
        Ok(Self { plan, options })
    }

    pub fn plan(&self) -> &SchemaPlan {
        &self.plan
    }

    /// Connect to Weaviate, apply the plan and close the connection.
    ///
    /// A connection failure returns before any schema request is issued.
    pub async fn provision(
        &self,
        connection: &ConnectionConfig,
        api_key: Option<Secret<String>>,
    ) -> Result<ProvisionReport> {
        let client = WeaviateClient::connect(connection, api_key).await?;
        self.run(Arc::new(client)).await
    }

    /// Apply the plan over an already open client, closing it afterwards
    pub async fn run<C>(&self, client: Arc<C>) -> Result<ProvisionReport>
    where
        C: SchemaClient + ?Sized,
    {
        with_connection(client, |client| async move { self.apply(client.as_ref()).await }).await
    }

    async fn apply<C>(&self, client: &C) -> Result<ProvisionReport>
    where
        C: SchemaClient + ?Sized,
    {
        let mut report = ProvisionReport::default();

        for collection in self.plan.iter() {
            if self.options.skip_existing && client.collection_exists(&collection.name).await? {
                info!("Collection already exists, skipping: {}", collection.name);
                report.skipped.push(collection.name.clone());
                continue;
            }

            info!("Creating collection: {}", collection.name);
            client.create_collection(collection).await?;
            report.created.push(collection.name.clone());
        }

        info!(
            "Provisioning finished: {} created, {} skipped",
            report.created.len(),
            report.skipped.len()
        );
        Ok(report)
    }
}
