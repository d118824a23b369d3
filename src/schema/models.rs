//! Declarative descriptors for schema collections

use serde::{Deserialize, Serialize};

/// Primitive property types understood by the service
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Text,
    Int,
    Number,
    Boolean,
    Date,
    Uuid,
    Blob,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::Int => "int",
            DataType::Number => "number",
            DataType::Boolean => "boolean",
            DataType::Date => "date",
            DataType::Uuid => "uuid",
            DataType::Blob => "blob",
        }
    }
}

/// Typed scalar property on a collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertySpec {
    /// Property name
    pub name: String,

    /// Value type
    pub data_type: DataType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Property pointing at objects of another collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReferenceSpec {
    /// Property name
    pub name: String,

    /// Name of the collection the reference resolves to
    pub target_collection: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A named collection with its properties and references
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionSpec {
    /// Collection name
    pub name: String,

    /// Human readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub properties: Vec<PropertySpec>,

    #[serde(default)]
    pub references: Vec<ReferenceSpec>,
}

impl PropertySpec {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            description: None,
        }
    }

    /// Shorthand for a text property
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Text)
    }
}

impl ReferenceSpec {
    pub fn new(name: impl Into<String>, target_collection: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_collection: target_collection.into(),
            description: None,
        }
    }
}

impl CollectionSpec {
    /// Create a collection declared by name only
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            properties: Vec::new(),
            references: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_property(mut self, property: PropertySpec) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_reference(mut self, reference: ReferenceSpec) -> Self {
        self.references.push(reference);
        self
    }

    /// Names of all properties, scalar and reference, in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .map(|p| p.name.as_str())
            .chain(self.references.iter().map(|r| r.name.as_str()))
    }

    /// Look up a reference by name
    pub fn reference(&self, name: &str) -> Option<&ReferenceSpec> {
        self.references.iter().find(|r| r.name == name)
    }
}
