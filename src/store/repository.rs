// src/store/repository.rs

use super::{Document, DocumentStore, Query, StoreError, StoreResult, StoredDocument};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// A record type that lives in its own collection.
///
/// The document id is not part of the stored body. It is injected into the
/// `id` field on read and stripped on write.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;
}

/// Typed view of one collection.
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub async fn list(&self, query: &Query) -> StoreResult<Vec<T>> {
        self.store
            .list(T::COLLECTION, query)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    /// `Ok(None)` when the document does not exist.
    pub async fn get(&self, id: &str) -> StoreResult<Option<T>> {
        self.store
            .get(T::COLLECTION, id)
            .await?
            .map(decode)
            .transpose()
    }

    /// Store `entity` under a freshly generated id and return it as persisted.
    pub async fn create(&self, entity: &T) -> StoreResult<T> {
        let data = encode(entity)?;
        let id = self.store.create(T::COLLECTION, data.clone()).await?;
        decode(StoredDocument { id, data })
    }

    /// Merge the non-id fields of `patch` into the stored document and return
    /// the merged record.
    pub async fn update<P: Serialize>(&self, id: &str, patch: &P) -> StoreResult<T> {
        let patch = encode(patch)?;
        self.store.update(T::COLLECTION, id, patch).await?;
        self.get(id).await?.ok_or_else(|| StoreError::NotFound {
            collection: T::COLLECTION.to_string(),
            id: id.to_string(),
        })
    }

    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        self.store.delete(T::COLLECTION, id).await
    }
}

fn encode<P: Serialize>(value: &P) -> StoreResult<Document> {
    match serde_json::to_value(value)? {
        Value::Object(mut map) => {
            map.remove("id");
            Ok(map)
        }
        _ => Err(StoreError::NotAnObject(std::any::type_name::<P>().to_string())),
    }
}

fn decode<T: DeserializeOwned>(doc: StoredDocument) -> StoreResult<T> {
    let mut data = doc.data;
    data.insert("id".to_string(), Value::String(doc.id));
    Ok(serde_json::from_value(Value::Object(data))?)
}
