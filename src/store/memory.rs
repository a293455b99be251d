use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{Document, DocumentStore};

/// In-process store with the same ordering rules as the Postgres one.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    writes_left: Mutex<Option<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let the next `n` writes succeed, then fail every write after them.
    pub fn fail_after_writes(&self, n: usize) {
        *self.writes_left.lock().unwrap() = Some(n);
    }

    fn check_write(&self) -> anyhow::Result<()> {
        let mut left = self.writes_left.lock().unwrap();
        match left.as_mut() {
            Some(0) => anyhow::bail!("store unavailable"),
            Some(n) => *n -= 1,
            None => {}
        }
        Ok(())
    }

    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, data: Value) -> anyhow::Result<String> {
        self.check_write()?;
        let id = Uuid::new_v4().simple().to_string();
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(Document { id: id.clone(), data });
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> anyhow::Result<()> {
        self.check_write()?;
        let mut guard = self.collections.lock().unwrap();
        let docs = guard.entry(collection.to_string()).or_default();
        docs.retain(|d| d.id != id);
        docs.push(Document { id: id.to_string(), data });
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> anyhow::Result<Option<Document>> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id).cloned()))
    }

    async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> anyhow::Result<Vec<Document>> {
        Ok(self
            .list(collection)
            .await?
            .into_iter()
            .filter(|d| d.data.get(field) == Some(value))
            .collect())
    }

    async fn list(&self, collection: &str) -> anyhow::Result<Vec<Document>> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> anyhow::Result<bool> {
        self.check_write()?;
        let mut guard = self.collections.lock().unwrap();
        let Some(doc) = guard
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
        else {
            return Ok(false);
        };
        match doc.data.as_object_mut() {
            Some(obj) => obj.extend(fields),
            None => doc.data = Value::Object(fields),
        }
        Ok(true)
    }

    async fn delete(&self, collection: &str, id: &str) -> anyhow::Result<bool> {
        self.check_write()?;
        let mut guard = self.collections.lock().unwrap();
        let Some(docs) = guard.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok(docs.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn set_moves_document_to_end_of_listing() {
        let store = MemoryStore::new();
        store.set("c", "a", json!({"n": 1})).await.unwrap();
        store.set("c", "b", json!({"n": 2})).await.unwrap();
        store.set("c", "a", json!({"n": 3})).await.unwrap();

        let docs = store.list("c").await.unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(docs[1].data, json!({"n": 3}));
    }

    #[tokio::test]
    async fn update_merges_and_keeps_position() {
        let store = MemoryStore::new();
        let first = store.insert("c", json!({"x": 1, "y": 1})).await.unwrap();
        store.insert("c", json!({"x": 2})).await.unwrap();

        let mut patch = Map::new();
        patch.insert("y".into(), json!(9));
        assert!(store.update("c", &first, patch).await.unwrap());
        assert!(!store.update("c", "missing", Map::new()).await.unwrap());

        let docs = store.list("c").await.unwrap();
        assert_eq!(docs[0].id, first);
        assert_eq!(docs[0].data, json!({"x": 1, "y": 9}));
    }

    #[tokio::test]
    async fn writes_fail_once_budget_is_spent() {
        let store = MemoryStore::new();
        store.fail_after_writes(1);

        store.set("c", "a", json!({})).await.unwrap();
        assert!(store.set("c", "b", json!({})).await.is_err());
        assert!(store.delete("c", "a").await.is_err());
        assert_eq!(store.len("c"), 1);
        assert!(store.get("c", "a").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn find_and_delete() {
        let store = MemoryStore::new();
        store.insert("c", json!({"email": "a@b.co"})).await.unwrap();
        let id = store.insert("c", json!({"email": "c@d.co"})).await.unwrap();

        let found = store.find_eq("c", "email", &json!("c@d.co")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);

        assert!(store.delete("c", &id).await.unwrap());
        assert!(!store.delete("c", &id).await.unwrap());
        assert!(store.get("c", &id).await.unwrap().is_none());
        assert_eq!(store.len("c"), 1);
    }
}
