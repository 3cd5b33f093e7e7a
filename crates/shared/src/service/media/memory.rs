use crate::{abstract_trait::MediaUploadTrait, domain::LocalFile, errors::UploadError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

/// Media host that keeps uploads in memory and hands out URLs under
/// `base_url`. Does not read the local file.
#[derive(Debug)]
pub struct MemoryMediaHost {
    base_url: String,
    uploads: Mutex<Vec<String>>,
    offline: AtomicBool,
}

impl MemoryMediaHost {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            uploads: Mutex::new(Vec::new()),
            offline: AtomicBool::new(false),
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn uploaded(&self) -> Vec<String> {
        self.uploads.lock().await.clone()
    }
}

#[async_trait]
impl MediaUploadTrait for MemoryMediaHost {
    async fn upload(&self, file: &LocalFile) -> Result<String, UploadError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(UploadError::Unavailable("media host is offline".to_string()));
        }

        let url = format!(
            "{}/{}-{}",
            self.base_url,
            Uuid::new_v4().simple(),
            file.file_name()
        );
        self.uploads.lock().await.push(url.clone());

        info!("Stored {} at {url}", file.path().display());
        Ok(url)
    }
}
