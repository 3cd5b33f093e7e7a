use crate::{
    abstract_trait::ProductRepositoryTrait,
    model::product::{Product, ProductRecord},
};
use async_trait::async_trait;
use serde_json::Value;
use shared::{
    abstract_trait::DynDocumentStore,
    domain::{Document, Fields},
    errors::StoreError,
};
use tracing::{error, info, warn};

/// Maps untyped store documents to [`Product`]s on the way in and
/// [`ProductRecord`]s to field maps on the way out.
#[derive(Clone)]
pub struct DocumentProductRepository {
    store: DynDocumentStore,
    collection: String,
}

impl DocumentProductRepository {
    pub fn new(store: DynDocumentStore, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    fn decode(document: Document) -> Result<Product, StoreError> {
        let Document { id, fields } = document;

        let record: ProductRecord =
            serde_json::from_value(Value::Object(fields)).map_err(|e| StoreError::Malformed {
                id: id.clone(),
                reason: e.to_string(),
            })?;

        if record.name.trim().is_empty() || record.brand.trim().is_empty() {
            return Err(StoreError::Malformed {
                id,
                reason: "name and brand must not be blank".to_string(),
            });
        }

        if !record.price.is_finite() || record.price < 0.0 {
            return Err(StoreError::Malformed {
                id,
                reason: format!("price {} is not a non-negative number", record.price),
            });
        }

        Ok(Product::from_record(id, record))
    }

    fn encode(record: &ProductRecord) -> Result<Fields, StoreError> {
        match serde_json::to_value(record) {
            Ok(Value::Object(fields)) => Ok(fields),
            Ok(other) => Err(StoreError::Custom(format!(
                "product record encoded as {other}, expected an object"
            ))),
            Err(e) => Err(StoreError::Custom(format!(
                "failed to encode product record: {e}"
            ))),
        }
    }
}

#[async_trait]
impl ProductRepositoryTrait for DocumentProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        info!("🔍 Fetching all products from '{}'", self.collection);

        let documents = self.store.list_all(&self.collection).await.map_err(|e| {
            error!("❌ Failed to list products: {e}");
            e
        })?;

        let total = documents.len();
        let products: Vec<Product> = documents
            .into_iter()
            .filter_map(|document| match Self::decode(document) {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!("⚠️ Skipping product record: {e}");
                    None
                }
            })
            .collect();

        info!("✅ Decoded {} of {total} product records", products.len());
        Ok(products)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, StoreError> {
        info!("🔍 Fetching product {id}");

        let document = self.store.get(&self.collection, id).await.map_err(|e| {
            error!("❌ Failed to fetch product {id}: {e}");
            e
        })?;

        document.map(Self::decode).transpose()
    }

    async fn create(&self, record: &ProductRecord) -> Result<String, StoreError> {
        info!("🆕 Creating product '{}'", record.name);

        let fields = Self::encode(record)?;
        let id = self.store.add(&self.collection, fields).await.map_err(|e| {
            error!("❌ Failed to create product '{}': {e}", record.name);
            e
        })?;

        info!("✅ Product created with id {id}");
        Ok(id)
    }

    async fn update(&self, id: &str, record: &ProductRecord) -> Result<(), StoreError> {
        info!("✏️ Updating product {id}");

        let fields = Self::encode(record)?;
        self.store
            .update(&self.collection, id, fields)
            .await
            .map_err(|e| {
                error!("❌ Failed to update product {id}: {e}");
                e
            })?;

        info!("✅ Product {id} updated");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        info!("🗑️ Deleting product {id}");

        self.store.delete(&self.collection, id).await.map_err(|e| {
            error!("❌ Failed to delete product {id}: {e}");
            e
        })?;

        info!("✅ Product {id} deleted");
        Ok(())
    }
}
