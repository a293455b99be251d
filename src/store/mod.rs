//! Schema-less document storage organized into named collections.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

#[cfg(test)]
pub mod memory;
pub mod pg;

pub use pg::PgDocumentStore;

pub mod collections {
    pub const INGREDIENTS: &str = "ingredients";
    pub const RECIPES: &str = "recipes";
    pub const IMAGES: &str = "images";
    pub const USERS: &str = "users";
}

/// A stored document: its key within the collection plus the JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

impl Document {
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.data.get(field).and_then(Value::as_str)
    }
}

/// Listing order is write order: ascending by insertion, where a full
/// replace through [`DocumentStore::set`] counts as a new write and a
/// merge through [`DocumentStore::update`] does not.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert with a store-assigned id, returning that id.
    async fn insert(&self, collection: &str, data: Value) -> anyhow::Result<String>;
    /// Create or fully replace the document at `id`.
    async fn set(&self, collection: &str, id: &str, data: Value) -> anyhow::Result<()>;
    async fn get(&self, collection: &str, id: &str) -> anyhow::Result<Option<Document>>;
    /// Documents whose top-level `field` equals `value`.
    async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> anyhow::Result<Vec<Document>>;
    async fn list(&self, collection: &str) -> anyhow::Result<Vec<Document>>;
    /// Merge top-level fields into an existing document. Returns false if absent.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> anyhow::Result<bool>;
    /// Returns false if there was nothing to delete.
    async fn delete(&self, collection: &str, id: &str) -> anyhow::Result<bool>;
}
