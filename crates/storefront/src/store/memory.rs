//! In-memory document store.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crescent_core::{DocumentStore, StoreError};

/// An in-memory [`DocumentStore`].
///
/// Collections are maps from key to document; `put` is a whole-document
/// overwrite and concurrent writers are last-writer-wins, matching the
/// semantics the storefront assumes of any real backend. Generated keys
/// are v4 UUIDs.
///
/// Keys within a collection iterate in sorted order so `list` and `query`
/// results are deterministic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently in a collection.
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    /// Whether a collection holds no documents.
    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }
}

impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(key))
            .cloned())
    }

    async fn put(&self, collection: &str, key: &str, document: Value) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_owned())
            .or_default()
            .insert(key.to_owned(), document);
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(key);
        }
        Ok(())
    }

    async fn append(&self, collection: &str, document: Value) -> Result<String, StoreError> {
        let key = Uuid::new_v4().to_string();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_owned())
            .or_default()
            .insert(key.clone(), document);
        Ok(key)
    }

    async fn query(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<(String, Value)>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, doc)| doc.get(field) == Some(value))
                    .map(|(k, doc)| (k.clone(), doc.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list(&self, collection: &str) -> Result<Vec<(String, Value)>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(k, doc)| (k.clone(), doc.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_absent_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("carts", "user-001").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites_whole_document() {
        let store = MemoryStore::new();
        store
            .put("carts", "user-001", json!({"items": [1, 2]}))
            .await
            .unwrap();
        store
            .put("carts", "user-001", json!({"items": []}))
            .await
            .unwrap();

        let doc = store.get("carts", "user-001").await.unwrap().unwrap();
        assert_eq!(doc, json!({"items": []}));
    }

    #[tokio::test]
    async fn test_append_generates_distinct_keys() {
        let store = MemoryStore::new();
        let a = store.append("orders", json!({"total": 1})).await.unwrap();
        let b = store.append("orders", json!({"total": 2})).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.len("orders").await, 2);
    }

    #[tokio::test]
    async fn test_delete_absent_is_noop() {
        let store = MemoryStore::new();
        store.delete("orders", "missing").await.unwrap();
        store.put("orders", "o1", json!({})).await.unwrap();
        store.delete("orders", "o1").await.unwrap();
        assert!(store.is_empty("orders").await);
    }

    #[tokio::test]
    async fn test_query_matches_field_equality() {
        let store = MemoryStore::new();
        store
            .put("orders", "a", json!({"userId": "u1", "total": 10}))
            .await
            .unwrap();
        store
            .put("orders", "b", json!({"userId": "u2", "total": 20}))
            .await
            .unwrap();
        store
            .put("orders", "c", json!({"userId": "u1", "total": 30}))
            .await
            .unwrap();

        let hits = store.query("orders", "userId", &json!("u1")).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|(_, doc)| doc["userId"] == "u1"));
    }

    #[tokio::test]
    async fn test_list_is_key_ordered() {
        let store = MemoryStore::new();
        store.put("products", "b", json!({"id": "b"})).await.unwrap();
        store.put("products", "a", json!({"id": "a"})).await.unwrap();

        let all = store.list("products").await.unwrap();
        let keys: Vec<&str> = all.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
