//! Wire models for the Weaviate REST schema API

use crate::schema::CollectionSpec;
use serde::{Deserialize, Serialize};

/// Class definition accepted by `POST /v1/schema`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeaviateClass {
    /// Collection name
    pub class: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub properties: Vec<WeaviateProperty>,
}

/// Property definition; a reference carries the target class name as its data type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeaviateProperty {
    pub name: String,

    #[serde(rename = "dataType")]
    pub data_type: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Subset of `GET /v1/meta`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetaResponse {
    #[serde(default)]
    pub hostname: Option<String>,

    #[serde(default)]
    pub version: Option<String>,
}

/// Error body returned by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Vec<ErrorMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl From<&CollectionSpec> for WeaviateClass {
    fn from(spec: &CollectionSpec) -> Self {
        let scalars = spec.properties.iter().map(|p| WeaviateProperty {
            name: p.name.clone(),
            data_type: vec![p.data_type.as_str().to_string()],
            description: p.description.clone(),
        });

        let references = spec.references.iter().map(|r| WeaviateProperty {
            name: r.name.clone(),
            data_type: vec![r.target_collection.clone()],
            description: r.description.clone(),
        });

        Self {
            class: spec.name.clone(),
            description: spec.description.clone(),
            properties: scalars.chain(references).collect(),
        }
    }
}

impl ErrorResponse {
    /// Join all messages, or fall back to the raw body when it is not the expected shape
    pub fn message_from(body: &str) -> String {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(parsed) if !parsed.error.is_empty() => parsed
                .error
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; "),
            _ => body.to_string(),
        }
    }
}
