use crate::{
    abstract_trait::DocumentStoreTrait,
    domain::{CollectionSnapshot, Document, Fields},
    errors::StoreError,
};
use async_trait::async_trait;
use std::{
    collections::{BTreeMap, HashMap},
    sync::{
        Mutex as SyncMutex,
        atomic::{AtomicBool, Ordering},
    },
};
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, error, info};
use uuid::Uuid;

const SNAPSHOT_CHANNEL_CAPACITY: usize = 16;

type Collections = HashMap<String, BTreeMap<String, Fields>>;

/// Process-local document store. Identifiers are random UUIDs.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<Collections>,
    subscribers: SyncMutex<HashMap<String, broadcast::Sender<CollectionSnapshot>>>,
    offline: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every call fails with `StoreError::Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("document store is offline".into()));
        }
        Ok(())
    }

    fn snapshot(collections: &Collections, collection: &str) -> CollectionSnapshot {
        let documents = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default();

        CollectionSnapshot {
            collection: collection.to_string(),
            documents,
        }
    }

    fn publish(&self, collections: &Collections, collection: &str) {
        let subscribers = match self.subscribers.lock() {
            Ok(subscribers) => subscribers,
            Err(e) => {
                error!("Subscriber registry poisoned: {e}");
                return;
            }
        };

        if let Some(sender) = subscribers.get(collection) {
            // A snapshot with no live receivers is simply dropped.
            let _ = sender.send(Self::snapshot(collections, collection));
        }
    }
}

#[async_trait]
impl DocumentStoreTrait for MemoryDocumentStore {
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.ensure_online()?;
        let collections = self.collections.lock().await;
        Ok(Self::snapshot(&collections, collection).documents)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.ensure_online()?;
        let collections = self.collections.lock().await;

        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document::new(id, fields.clone())))
    }

    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        self.ensure_online()?;
        let id = Uuid::new_v4().simple().to_string();

        let mut collections = self.collections.lock().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields);
        self.publish(&collections, collection);

        info!("Document {collection}/{id} added");
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut collections = self.collections.lock().await;

        let existing = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or(StoreError::NotFound)?;

        for (key, value) in fields {
            existing.insert(key, value);
        }
        self.publish(&collections, collection);

        info!("Document {collection}/{id} updated");
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut collections = self.collections.lock().await;

        let removed = collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(id));

        match removed {
            Some(_) => {
                self.publish(&collections, collection);
                info!("Document {collection}/{id} deleted");
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn subscribe(&self, collection: &str) -> Option<broadcast::Receiver<CollectionSnapshot>> {
        let mut subscribers = self.subscribers.lock().ok()?;
        let sender = subscribers
            .entry(collection.to_string())
            .or_insert_with(|| broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY).0);

        debug!("New subscriber on collection {collection}");
        Some(sender.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use testresult::TestResult;

    fn fields(name: &str) -> Fields {
        let mut fields = Fields::new();
        fields.insert("name".into(), json!(name));
        fields
    }

    #[tokio::test]
    async fn add_then_get_returns_the_stored_fields() -> TestResult {
        let store = MemoryDocumentStore::new();

        let id = store.add("products", fields("Argan oil")).await?;
        let doc = store.get("products", &id).await?;

        assert_eq!(doc, Some(Document::new(id, fields("Argan oil"))));

        Ok(())
    }

    #[tokio::test]
    async fn update_merges_fields_and_keeps_the_rest() -> TestResult {
        let store = MemoryDocumentStore::new();
        let mut initial = fields("Shampoo");
        initial.insert("brand".into(), json!("Acme"));

        let id = store.add("products", initial).await?;
        store.update("products", &id, fields("Conditioner")).await?;

        let doc = store.get("products", &id).await?.ok_or("missing document")?;
        assert_eq!(doc.fields.get("name"), Some(&json!("Conditioner")));
        assert_eq!(doc.fields.get("brand"), Some(&json!("Acme")));

        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_unknown_id_return_not_found() {
        let store = MemoryDocumentStore::new();

        let updated = store.update("products", "missing", fields("x")).await;
        let deleted = store.delete("products", "missing").await;

        assert!(matches!(updated, Err(StoreError::NotFound)), "got {updated:?}");
        assert!(matches!(deleted, Err(StoreError::NotFound)), "got {deleted:?}");
    }

    #[tokio::test]
    async fn offline_store_rejects_reads() {
        let store = MemoryDocumentStore::new();
        store.set_offline(true);

        let result = store.list_all("products").await;

        assert!(
            matches!(result, Err(StoreError::Unavailable(_))),
            "got {result:?}"
        );
    }

    #[tokio::test]
    async fn subscribers_receive_a_snapshot_after_each_write() -> TestResult {
        let store = MemoryDocumentStore::new();
        let mut rx = store
            .subscribe("products")
            .ok_or("subscription unavailable")?;

        let id = store.add("products", fields("Nail polish")).await?;
        let snapshot = rx.recv().await?;
        assert_eq!(snapshot.documents.len(), 1);

        store.delete("products", &id).await?;
        let snapshot = rx.recv().await?;
        assert!(snapshot.documents.is_empty());

        Ok(())
    }
}
