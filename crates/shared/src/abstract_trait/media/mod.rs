use crate::{domain::LocalFile, errors::UploadError};
use async_trait::async_trait;
use mockall::automock;
use std::sync::Arc;

pub type DynMediaUpload = Arc<dyn MediaUploadTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait MediaUploadTrait {
    /// Uploads the file and returns its durable public URL.
    async fn upload(&self, file: &LocalFile) -> Result<String, UploadError>;
}
