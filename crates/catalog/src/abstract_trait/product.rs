use crate::model::product::{Product, ProductRecord};
use async_trait::async_trait;
use shared::errors::StoreError;
use std::sync::Arc;

pub type DynProductRepository = Arc<dyn ProductRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<Product>, StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, StoreError>;
    async fn create(&self, record: &ProductRecord) -> Result<String, StoreError>;
    async fn update(&self, id: &str, record: &ProductRecord) -> Result<(), StoreError>;
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
