use crate::{
    domain::{CollectionSnapshot, Document, Fields},
    errors::StoreError,
};
use async_trait::async_trait;
use mockall::automock;
use std::sync::Arc;
use tokio::sync::broadcast;

pub type DynDocumentStore = Arc<dyn DocumentStoreTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait DocumentStoreTrait {
    /// Every document in the collection, in no particular order.
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Stores a new document and returns the identifier the store assigned.
    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// Merges `fields` into the existing document. Fails with `NotFound` if
    /// the identifier is unknown.
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Live snapshots of the collection, if the store supports them.
    fn subscribe(&self, collection: &str) -> Option<broadcast::Receiver<CollectionSnapshot>>;
}
