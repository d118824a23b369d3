//! Schema plan: the ordered set of collections to declare

pub mod models;

pub use models::{CollectionSpec, DataType, PropertySpec, ReferenceSpec};

use crate::error::{Result, SchemaError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Name of the built-in category collection
pub const CATEGORY_COLLECTION: &str = "JeopardyCategory";

/// Name of the built-in question collection
pub const QUESTION_COLLECTION: &str = "JeopardyQuestion";

/// Collections in creation order.
///
/// A reference may only target a collection declared earlier in the plan,
/// since the service resolves the target when the referencing collection is
/// created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemaPlan {
    pub collections: Vec<CollectionSpec>,
}

impl Default for SchemaPlan {
    fn default() -> Self {
        Self::jeopardy()
    }
}

impl SchemaPlan {
    pub fn new(collections: Vec<CollectionSpec>) -> Self {
        Self { collections }
    }

    /// Category collection followed by the question collection referencing it
    pub fn jeopardy() -> Self {
        Self::new(vec![
            CollectionSpec::new(CATEGORY_COLLECTION),
            CollectionSpec::new(QUESTION_COLLECTION)
                .with_description("A Jeopardy! question")
                .with_property(PropertySpec::text("question"))
                .with_property(PropertySpec::text("answer"))
                .with_reference(ReferenceSpec::new("hasCategory", CATEGORY_COLLECTION)),
        ])
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CollectionSpec> {
        self.collections.iter()
    }

    /// Check names, uniqueness and reference ordering
    pub fn validate(&self) -> Result<()> {
        if self.collections.is_empty() {
            return Err(invalid("plan declares no collections"));
        }

        let mut declared: HashSet<&str> = HashSet::new();

        for collection in &self.collections {
            if !is_collection_name(&collection.name) {
                return Err(invalid(format!(
                    "invalid collection name '{}' (must start with an uppercase letter)",
                    collection.name
                )));
            }

            let mut fields: HashSet<&str> = HashSet::new();
            for field in collection.field_names() {
                if !is_property_name(field) {
                    return Err(invalid(format!(
                        "invalid property name '{}' on {}",
                        field, collection.name
                    )));
                }
                if !fields.insert(field) {
                    return Err(invalid(format!(
                        "duplicate property '{}' on {}",
                        field, collection.name
                    )));
                }
            }

            for reference in &collection.references {
                if !declared.contains(reference.target_collection.as_str()) {
                    return Err(invalid(format!(
                        "reference {}.{} targets '{}', which is not declared before it",
                        collection.name, reference.name, reference.target_collection
                    )));
                }
            }

            if !declared.insert(collection.name.as_str()) {
                return Err(invalid(format!(
                    "duplicate collection '{}'",
                    collection.name
                )));
            }
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> crate::error::ProvisionError {
    SchemaError::InvalidPlan(message.into()).into()
}

fn is_collection_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_property_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
