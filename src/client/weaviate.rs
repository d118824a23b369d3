//! Weaviate REST client for schema administration

use super::models::{ErrorResponse, MetaResponse, WeaviateClass};
use super::SchemaClient;
use crate::config::ConnectionConfig;
use crate::error::{ConnectionError, Result, SchemaError};
use crate::schema::CollectionSpec;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Connection to a Weaviate instance.
///
/// Schema requests go over the REST endpoint. The gRPC endpoint is kept for
/// reporting only.
pub struct WeaviateClient {
    base_url: String,
    grpc_url: String,
    http_client: Client,
    closed: AtomicBool,
}

impl WeaviateClient {
    /// Open a connection and verify it against `GET /v1/meta`.
    ///
    /// A missing or blank credential fails before any request is sent.
    pub async fn connect(config: &ConnectionConfig, api_key: Option<Secret<String>>) -> Result<Self> {
        let api_key = api_key
            .filter(|key| !key.expose_secret().trim().is_empty())
            .ok_or(ConnectionError::MissingCredential)?;

        let base_url = config.http_url();
        let grpc_url = config.grpc_url();
        info!("Connecting to Weaviate at {} (gRPC {})", base_url, grpc_url);

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|e| ConnectionError::InvalidCredential(e.to_string()))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(ConnectionError::Network)?;

        let client = Self {
            base_url,
            grpc_url,
            http_client,
            closed: AtomicBool::new(false),
        };

        let meta = client.probe().await?;
        info!(
            "Connected to Weaviate version {}",
            meta.version.as_deref().unwrap_or("unknown")
        );

        Ok(client)
    }

    /// REST base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// gRPC endpoint
    pub fn grpc_url(&self) -> &str {
        &self.grpc_url
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(ConnectionError::Closed.into());
        }
        Ok(())
    }

    async fn probe(&self) -> Result<MetaResponse> {
        let url = format!("{}/v1/meta", self.base_url);
        debug!("Probing {}", url);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ConnectionError::Unreachable(format!("{}: {}", self.base_url, e))
            } else {
                ConnectionError::Network(e)
            }
        })?;

        match response.status() {
            StatusCode::OK => {
                let meta = response
                    .json::<MetaResponse>()
                    .await
                    .unwrap_or_default();
                Ok(meta)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                error!("Authentication rejected by {}", self.base_url);
                Err(ConnectionError::AuthenticationFailed.into())
            }
            status => Err(unexpected(status, response).await),
        }
    }
}

#[async_trait]
impl SchemaClient for WeaviateClient {
    async fn collection_exists(&self, name: &str) -> Result<bool> {
        self.ensure_open()?;
        debug!("Checking collection: {}", name);

        let response = self
            .http_client
            .get(format!("{}/v1/schema/{}", self.base_url, name))
            .send()
            .await
            .map_err(ConnectionError::Network)?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ConnectionError::AuthenticationFailed.into())
            }
            status => Err(unexpected(status, response).await),
        }
    }

    async fn create_collection(&self, collection: &CollectionSpec) -> Result<()> {
        self.ensure_open()?;

        let class = WeaviateClass::from(collection);
        debug!(
            "Creating collection: {} with {} properties",
            class.class,
            class.properties.len()
        );

        let response = self
            .http_client
            .post(format!("{}/v1/schema", self.base_url))
            .json(&class)
            .send()
            .await
            .map_err(ConnectionError::Network)?;

        let status = response.status();
        if status.is_success() {
            info!("Collection created: {}", collection.name);
            return Ok(());
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ConnectionError::AuthenticationFailed.into());
        }

        let body = response.text().await.unwrap_or_default();
        let message = ErrorResponse::message_from(&body);

        if status == StatusCode::UNPROCESSABLE_ENTITY && message.contains("already exists") {
            warn!("Collection already exists: {}", collection.name);
            return Err(SchemaError::CollectionExists(collection.name.clone()).into());
        }

        error!("Creating {} failed with status {}: {}", collection.name, status, message);
        Err(SchemaError::Rejected {
            collection: collection.name.clone(),
            status: status.as_u16(),
            body: message,
        }
        .into())
    }

    async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            debug!("Connection to {} already closed", self.base_url);
        } else {
            info!("Connection to {} closed", self.base_url);
        }
        Ok(())
    }
}

async fn unexpected(status: StatusCode, response: Response) -> crate::error::ProvisionError {
    let body = response.text().await.unwrap_or_default();
    ConnectionError::Unexpected {
        status: status.as_u16(),
        body: ErrorResponse::message_from(&body),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProvisionError;
    use crate::schema::SchemaPlan;
    use mockito::Matcher;
    use serde_json::json;

    fn config_for(server: &mockito::ServerGuard) -> ConnectionConfig {
        let host_port = server.host_with_port();
        let (host, port) = host_port.rsplit_once(':').unwrap();
        ConnectionConfig {
            http_host: host.to_string(),
            http_port: port.parse().unwrap(),
            grpc_host: host.to_string(),
            ..ConnectionConfig::default()
        }
    }

    fn key(value: &str) -> Option<Secret<String>> {
        Some(Secret::new(value.to_string()))
    }

    async fn meta_ok(server: &mut mockito::ServerGuard) -> mockito::Mock {
        server
            .mock("GET", "/v1/meta")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_body(r#"{"hostname":"http://[::]:8080","version":"1.24.1"}"#)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_missing_credential_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let meta = server.mock("GET", "/v1/meta").expect(0).create_async().await;

        let result = WeaviateClient::connect(&config_for(&server), None).await;
        assert!(matches!(
            result,
            Err(ProvisionError::Connection(ConnectionError::MissingCredential))
        ));

        let result = WeaviateClient::connect(&config_for(&server), key("  ")).await;
        assert!(matches!(
            result,
            Err(ProvisionError::Connection(ConnectionError::MissingCredential))
        ));

        meta.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_credential() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/meta")
            .with_status(401)
            .create_async()
            .await;

        let result = WeaviateClient::connect(&config_for(&server), key("wrong")).await;
        assert!(matches!(
            result,
            Err(ProvisionError::Connection(ConnectionError::AuthenticationFailed))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        let config = ConnectionConfig {
            http_host: "127.0.0.1".to_string(),
            http_port: 1,
            timeout_secs: 2,
            ..ConnectionConfig::default()
        };

        let result = WeaviateClient::connect(&config, key("test-key")).await;
        assert!(matches!(
            result,
            Err(ProvisionError::Connection(ConnectionError::Unreachable(_)))
        ));
    }

    #[tokio::test]
    async fn test_create_collection_request_shape() {
        let mut server = mockito::Server::new_async().await;
        meta_ok(&mut server).await;
        let create = server
            .mock("POST", "/v1/schema")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::Json(json!({
                "class": "JeopardyQuestion",
                "description": "A Jeopardy! question",
                "properties": [
                    { "name": "question", "dataType": ["text"] },
                    { "name": "answer", "dataType": ["text"] },
                    { "name": "hasCategory", "dataType": ["JeopardyCategory"] }
                ]
            })))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = WeaviateClient::connect(&config_for(&server), key("test-key"))
            .await
            .unwrap();
        let plan = SchemaPlan::jeopardy();
        client.create_collection(&plan.collections[1]).await.unwrap();

        create.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_conflict_maps_to_collection_exists() {
        let mut server = mockito::Server::new_async().await;
        meta_ok(&mut server).await;
        server
            .mock("POST", "/v1/schema")
            .with_status(422)
            .with_body(r#"{"error":[{"message":"class name \"JeopardyCategory\" already exists"}]}"#)
            .create_async()
            .await;

        let client = WeaviateClient::connect(&config_for(&server), key("test-key"))
            .await
            .unwrap();
        let err = client
            .create_collection(&CollectionSpec::new("JeopardyCategory"))
            .await
            .unwrap_err();

        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_create_other_failure_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        meta_ok(&mut server).await;
        server
            .mock("POST", "/v1/schema")
            .with_status(422)
            .with_body(r#"{"error":[{"message":"invalid dataType"}]}"#)
            .create_async()
            .await;

        let client = WeaviateClient::connect(&config_for(&server), key("test-key"))
            .await
            .unwrap();
        let err = client
            .create_collection(&CollectionSpec::new("Broken"))
            .await
            .unwrap_err();

        match err {
            ProvisionError::Schema(SchemaError::Rejected { collection, status, body }) => {
                assert_eq!(collection, "Broken");
                assert_eq!(status, 422);
                assert_eq!(body, "invalid dataType");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_collection_exists() {
        let mut server = mockito::Server::new_async().await;
        meta_ok(&mut server).await;
        server
            .mock("GET", "/v1/schema/JeopardyCategory")
            .with_status(200)
            .with_body(r#"{"class":"JeopardyCategory","properties":[]}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/v1/schema/JeopardyQuestion")
            .with_status(404)
            .create_async()
            .await;

        let client = WeaviateClient::connect(&config_for(&server), key("test-key"))
            .await
            .unwrap();

        assert!(client.collection_exists("JeopardyCategory").await.unwrap());
        assert!(!client.collection_exists("JeopardyQuestion").await.unwrap());
    }

    #[tokio::test]
    async fn test_closed_client_rejects_requests() {
        let mut server = mockito::Server::new_async().await;
        meta_ok(&mut server).await;
        let create = server.mock("POST", "/v1/schema").expect(0).create_async().await;

        let client = WeaviateClient::connect(&config_for(&server), key("test-key"))
            .await
            .unwrap();
        client.close().await.unwrap();
        client.close().await.unwrap();
        assert!(client.is_closed());

        let result = client.create_collection(&CollectionSpec::new("JeopardyCategory")).await;
        assert!(matches!(
            result,
            Err(ProvisionError::Connection(ConnectionError::Closed))
        ));
        create.assert_async().await;
    }
}
