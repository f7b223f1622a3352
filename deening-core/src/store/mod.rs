//! Document storage abstraction.
//!
//! Content records, inventory items and preference keywords are all stored as
//! JSON documents in named collections. Each document may carry a lookup key
//! (the subject it was generated for, or a dedup key for CRUD entities).
//! Backends only need equality on id and key plus a simple substring search.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Stored document {id} is malformed: {message}")]
    Corrupt { id: Uuid, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Recipes,
    Ingredients,
    CookingSteps,
    Refrigerator,
    Preferences,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Recipes => "recipes",
            Collection::Ingredients => "ingredients",
            Collection::CookingSteps => "cooking_steps",
            Collection::Refrigerator => "refrigerator",
            Collection::Preferences => "preferences",
        }
    }
}

/// A stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: Uuid,
    pub key: Option<String>,
    pub body: Value,
}

impl Document {
    /// Deserialize the body into a typed record.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        serde_json::from_value(self.body.clone()).map_err(|e| StoreError::Corrupt {
            id: self.id,
            message: e.to_string(),
        })
    }

    /// Top-level string field, if present.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.body.get(field).and_then(Value::as_str)
    }
}

/// A document about to be inserted. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub key: Option<String>,
    pub body: Value,
}

impl NewDocument {
    pub fn keyed(key: impl Into<String>, body: Value) -> Self {
        Self {
            key: Some(key.into()),
            body,
        }
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Earliest document whose lookup key equals `key`.
    async fn find_by_key(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<Option<Document>, StoreError>;

    async fn find_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<Document>, StoreError>;

    /// All documents in insertion order.
    async fn find_all(&self, collection: Collection) -> Result<Vec<Document>, StoreError>;

    /// Documents where any of `fields` contains `needle`, case-insensitively,
    /// ordered by their lowercased `name` field.
    async fn search(
        &self,
        collection: Collection,
        fields: &[&str],
        needle: &str,
    ) -> Result<Vec<Document>, StoreError>;

    async fn insert(&self, collection: Collection, doc: NewDocument) -> Result<Uuid, StoreError>;

    /// Shallow-merge `patch` into the body of document `id`, optionally
    /// replacing its lookup key. Returns false when no document matched.
    async fn update(
        &self,
        collection: Collection,
        id: Uuid,
        key: Option<String>,
        patch: Map<String, Value>,
    ) -> Result<bool, StoreError>;

    /// Add `delta` to the numeric top-level `field` of document `id` in a single
    /// atomic step, treating a missing field as zero. Returns the new value, or
    /// `None` when no document matched.
    async fn increment(
        &self,
        collection: Collection,
        id: Uuid,
        field: &str,
        delta: f64,
    ) -> Result<Option<f64>, StoreError>;

    /// Returns false when no document matched.
    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, StoreError>;

    /// Atomically replace the whole collection. Returns the new ids in input order.
    async fn replace_all(
        &self,
        collection: Collection,
        docs: Vec<NewDocument>,
    ) -> Result<Vec<Uuid>, StoreError>;
}

/// Parse a client-supplied identifier. Anything that is not a UUID cannot
/// name a stored document.
pub fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}

/// Case-insensitive substring match used by in-process search.
pub(crate) fn matches_any(body: &Value, fields: &[&str], needle_lower: &str) -> bool {
    fields.iter().any(|field| {
        body.get(*field)
            .and_then(Value::as_str)
            .map(|value| value.to_lowercase().contains(needle_lower))
            .unwrap_or(false)
    })
}
