//! In-process document store.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{matches_any, Collection, Document, DocumentStore, NewDocument, StoreError};

/// Document store backed by process memory. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn materialize(doc: NewDocument) -> Document {
        Document {
            id: Uuid::new_v4(),
            key: doc.key,
            body: doc.body,
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_by_key(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| d.key.as_deref() == Some(key)))
            .cloned())
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn find_all(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).cloned().unwrap_or_default())
    }

    async fn search(
        &self,
        collection: Collection,
        fields: &[&str],
        needle: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let needle = needle.to_lowercase();
        let collections = self.collections.read().await;

        let mut found: Vec<Document> = collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| matches_any(&d.body, fields, &needle))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        found.sort_by_cached_key(|d| d.str_field("name").map(str::to_lowercase));
        Ok(found)
    }

    async fn insert(&self, collection: Collection, doc: NewDocument) -> Result<Uuid, StoreError> {
        let doc = Self::materialize(doc);
        let id = doc.id;
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(doc);
        Ok(id)
    }

    async fn update(
        &self,
        collection: Collection,
        id: Uuid,
        key: Option<String>,
        patch: Map<String, Value>,
    ) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(doc) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
        else {
            return Ok(false);
        };

        match &mut doc.body {
            Value::Object(body) => body.extend(patch),
            other => *other = Value::Object(patch),
        }
        if key.is_some() {
            doc.key = key;
        }
        Ok(true)
    }

    async fn increment(
        &self,
        collection: Collection,
        id: Uuid,
        field: &str,
        delta: f64,
    ) -> Result<Option<f64>, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(doc) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
        else {
            return Ok(None);
        };

        let Value::Object(body) = &mut doc.body else {
            return Err(StoreError::Corrupt {
                id,
                message: "body is not an object".to_string(),
            });
        };
        let current = match body.get(field) {
            None | Some(Value::Null) => 0.0,
            Some(value) => value.as_f64().ok_or_else(|| StoreError::Corrupt {
                id,
                message: format!("{} is not a number", field),
            })?,
        };
        let total = current + delta;
        body.insert(field.to_string(), Value::from(total));
        Ok(Some(total))
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok(docs.len() != before)
    }

    async fn replace_all(
        &self,
        collection: Collection,
        docs: Vec<NewDocument>,
    ) -> Result<Vec<Uuid>, StoreError> {
        let docs: Vec<Document> = docs.into_iter().map(Self::materialize).collect();
        let ids = docs.iter().map(|d| d.id).collect();
        self.collections.write().await.insert(collection, docs);
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = MemoryStore::new();
        let id = store
            .insert(
                Collection::Recipes,
                NewDocument::keyed("kimchi stew", json!({"name": "kimchi stew"})),
            )
            .await
            .unwrap();

        let by_key = store
            .find_by_key(Collection::Recipes, "kimchi stew")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_key.id, id);

        let by_id = store.find_by_id(Collection::Recipes, id).await.unwrap();
        assert_eq!(by_id, Some(by_key));

        // Collections are isolated
        assert!(store
            .find_by_id(Collection::Ingredients, id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_sorted() {
        let store = MemoryStore::new();
        for (name, description) in [
            ("Soybean paste stew", "hearty"),
            ("kimchi fried rice", "quick"),
            ("Bibimbap", "rice bowl with kimchi"),
        ] {
            store
                .insert(
                    Collection::Recipes,
                    NewDocument::keyed(name, json!({"name": name, "description": description})),
                )
                .await
                .unwrap();
        }

        let found = store
            .search(Collection::Recipes, &["name", "description"], "KIMCHI")
            .await
            .unwrap();
        let names: Vec<_> = found.iter().filter_map(|d| d.str_field("name")).collect();
        assert_eq!(names, vec!["Bibimbap", "kimchi fried rice"]);
    }

    #[tokio::test]
    async fn test_search_order_ignores_case() {
        let store = MemoryStore::new();
        for name in ["Kimchi stew", "braised kimchi", "apple kimchi salad"] {
            store
                .insert(Collection::Recipes, NewDocument::keyed(name, json!({"name": name})))
                .await
                .unwrap();
        }

        let found = store
            .search(Collection::Recipes, &["name"], "kimchi")
            .await
            .unwrap();
        let names: Vec<_> = found.iter().filter_map(|d| d.str_field("name")).collect();
        assert_eq!(names, vec!["apple kimchi salad", "braised kimchi", "Kimchi stew"]);
    }

    #[tokio::test]
    async fn test_increment_adds_in_place() {
        let store = MemoryStore::new();
        let id = store
            .insert(
                Collection::Refrigerator,
                NewDocument::keyed("milk|dairy|L", json!({"name": "milk", "amount": 1.0})),
            )
            .await
            .unwrap();

        let total = store
            .increment(Collection::Refrigerator, id, "amount", 0.5)
            .await
            .unwrap();
        assert_eq!(total, Some(1.5));

        let doc = store
            .find_by_id(Collection::Refrigerator, id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc.body, json!({"name": "milk", "amount": 1.5}));

        let err = store
            .increment(Collection::Refrigerator, id, "name", 1.0)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));

        let missing = store
            .increment(Collection::Refrigerator, Uuid::new_v4(), "amount", 1.0)
            .await
            .unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryStore::new();
        let id = store
            .insert(
                Collection::Refrigerator,
                NewDocument::keyed("egg|dairy|ea", json!({"name": "egg", "amount": 2.0})),
            )
            .await
            .unwrap();

        let updated = store
            .update(
                Collection::Refrigerator,
                id,
                None,
                object(json!({"amount": 5.0})),
            )
            .await
            .unwrap();
        assert!(updated);

        let doc = store
            .find_by_id(Collection::Refrigerator, id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc.body, json!({"name": "egg", "amount": 5.0}));
        assert_eq!(doc.key.as_deref(), Some("egg|dairy|ea"));

        let missing = store
            .update(Collection::Refrigerator, Uuid::new_v4(), None, Map::new())
            .await
            .unwrap();
        assert!(!missing);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::new();
        let id = store
            .insert(Collection::Preferences, NewDocument::keyed("a|LIKE", json!({})))
            .await
            .unwrap();

        assert!(store.delete(Collection::Preferences, id).await.unwrap());
        assert!(!store.delete(Collection::Preferences, id).await.unwrap());
        assert!(store
            .find_by_id(Collection::Preferences, id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_replace_all() {
        let store = MemoryStore::new();
        store
            .insert(Collection::Refrigerator, NewDocument::keyed("old", json!({})))
            .await
            .unwrap();

        let ids = store
            .replace_all(
                Collection::Refrigerator,
                vec![
                    NewDocument::keyed("a", json!({"name": "a"})),
                    NewDocument::keyed("b", json!({"name": "b"})),
                ],
            )
            .await
            .unwrap();

        let all = store.find_all(Collection::Refrigerator).await.unwrap();
        assert_eq!(all.iter().map(|d| d.id).collect::<Vec<_>>(), ids);
        assert!(store
            .find_by_key(Collection::Refrigerator, "old")
            .await
            .unwrap()
            .is_none());
    }
}
