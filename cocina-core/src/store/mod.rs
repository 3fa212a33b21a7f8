//! The recipe store seam.
//!
//! A store holds raw documents of the `recipes` collection. The repository is
//! the only caller; everything above it works with [`crate::Recipe`].

mod http;
mod memory;

pub use http::HttpStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::StoreError;

/// Name of the document collection holding recipes.
pub const COLLECTION: &str = "recipes";

/// Document fields as stored. Absent fields deserialize to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A stored document: the store-assigned id plus its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDocument {
    pub id: String,
    #[serde(flatten)]
    pub fields: RecipeFields,
}

/// The fields an update overwrites. Category and image are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeUpdate {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
}

/// A document store holding the `recipes` collection.
///
/// Implementations must report a missing id on `update` as
/// [`StoreError::NotFound`] and treat `delete` of a missing id as success.
#[async_trait]
pub trait RecipeStore: Send + Sync + fmt::Debug {
    /// List documents, optionally only those whose category equals `category`.
    async fn list(&self, category: Option<&str>) -> Result<Vec<RecipeDocument>, StoreError>;

    /// Insert a new document and return its id.
    async fn insert(&self, fields: &RecipeFields) -> Result<String, StoreError>;

    async fn update(&self, id: &str, update: &RecipeUpdate) -> Result<(), StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Distinct categories in the order they first appear in the collection.
    async fn categories(&self) -> Result<Vec<String>, StoreError> {
        let documents = self.list(None).await?;
        let mut seen = HashSet::new();
        Ok(documents
            .into_iter()
            .map(|d| d.fields.category)
            .filter(|c| seen.insert(c.clone()))
            .collect())
    }

    /// Short name for logs (e.g. "memory", "http").
    fn store_name(&self) -> &'static str;
}
