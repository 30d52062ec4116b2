// src/store/memory.rs

use super::{
    compare_values, Document, DocumentStore, Query, SortDirection, StoreError, StoreResult,
    StoredDocument,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

type Collections = HashMap<String, Vec<StoredDocument>>;

/// Process-local document store. Used by the test suite and as the fallback
/// backend when no database is configured. Insertion order is preserved so
/// unordered listings are stable.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    collections: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Collections> {
        // A poisoned lock only means another request panicked mid-operation;
        // the map itself is still usable.
        self.collections
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Collections> {
        self.collections
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, collection: &str, query: &Query) -> StoreResult<Vec<StoredDocument>> {
        let mut docs: Vec<StoredDocument> = self
            .read()
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| query.matches(&doc.data))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order_by {
            docs.sort_by(|a, b| {
                let ord = compare_values(a.data.get(&order.field), b.data.get(&order.field));
                match order.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        Ok(docs)
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<StoredDocument>> {
        Ok(self
            .read()
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id))
            .cloned())
    }

    async fn create(&self, collection: &str, data: Document) -> StoreResult<String> {
        let id = Uuid::new_v4().to_string();
        self.write()
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument {
                id: id.clone(),
                data,
            });
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, patch: Document) -> StoreResult<()> {
        let mut guard = self.write();
        let doc = guard
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        for (field, value) in patch {
            doc.data.insert(field, value);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let mut guard = self.write();
        let Some(docs) = guard.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|doc| doc.id != id);
        Ok(docs.len() != before)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().expect("object literal")
    }

    #[tokio::test]
    async fn create_then_get_round_trips_document() {
        let store = MemoryStore::new();
        let id = store
            .create("assets", doc(json!({ "name": "Laptop" })))
            .await
            .expect("create");

        let fetched = store.get("assets", &id).await.expect("get").expect("present");
        assert_eq!(fetched.data["name"], json!("Laptop"));
        assert!(store.get("assets", "missing").await.expect("get").is_none());
        assert!(store.get("other", &id).await.expect("get").is_none());
    }

    #[tokio::test]
    async fn update_merges_top_level_fields() {
        let store = MemoryStore::new();
        let id = store
            .create("assets", doc(json!({ "name": "Laptop", "status": "available" })))
            .await
            .expect("create");

        store
            .update("assets", &id, doc(json!({ "status": "assigned", "assigned_to": "emp-1" })))
            .await
            .expect("update");

        let fetched = store.get("assets", &id).await.expect("get").expect("present");
        assert_eq!(fetched.data["name"], json!("Laptop"));
        assert_eq!(fetched.data["status"], json!("assigned"));
        assert_eq!(fetched.data["assigned_to"], json!("emp-1"));
    }

    #[tokio::test]
    async fn update_of_missing_document_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update("assets", "nope", Document::new())
            .await
            .expect_err("missing document");
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_filters_and_orders() {
        let store = MemoryStore::new();
        for (emp, days) in [("a", 3), ("b", 1), ("a", 7), ("a", 5)] {
            store
                .create("leave_requests", doc(json!({ "employee_id": emp, "days": days })))
                .await
                .expect("create");
        }

        let query = Query::new()
            .filter("employee_id", "a")
            .order_by("days", SortDirection::Desc);
        let docs = store.list("leave_requests", &query).await.expect("list");
        let days: Vec<_> = docs.iter().map(|d| d.data["days"].clone()).collect();
        assert_eq!(days, vec![json!(7), json!(5), json!(3)]);
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let store = MemoryStore::new();
        let id = store
            .create("assets", doc(json!({})))
            .await
            .expect("create");

        assert!(store.delete("assets", &id).await.expect("delete"));
        assert!(!store.delete("assets", &id).await.expect("delete"));
        assert!(!store.delete("unknown", &id).await.expect("delete"));
    }
}
