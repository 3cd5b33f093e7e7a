use crate::{abstract_trait::MediaUploadTrait, domain::LocalFile, errors::UploadError};
use async_trait::async_trait;
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use serde::Deserialize;
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct MediaUploadConfig {
    /// Endpoint accepting an unsigned multipart upload.
    pub upload_url: String,

    pub upload_preset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
}

impl UploadResponse {
    fn into_url(self) -> Result<String, UploadError> {
        self.secure_url
            .or(self.url)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| UploadError::InvalidResponse("response carries no URL".to_string()))
    }
}

/// Uploads files as `multipart/form-data` and reads the durable URL from
/// the JSON response.
#[derive(Debug, Clone)]
pub struct HttpMediaUploader {
    config: MediaUploadConfig,
    http: Client,
}

impl HttpMediaUploader {
    pub fn new(config: MediaUploadConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn parse_response(body: &str) -> Result<String, UploadError> {
        let parsed: UploadResponse = serde_json::from_str(body)
            .map_err(|e| UploadError::InvalidResponse(format!("invalid JSON body: {e}")))?;

        parsed.into_url()
    }
}

#[async_trait]
impl MediaUploadTrait for HttpMediaUploader {
    async fn upload(&self, file: &LocalFile) -> Result<String, UploadError> {
        let bytes = tokio::fs::read(file.path()).await?;
        let size = bytes.len();

        let part = Part::bytes(bytes)
            .file_name(file.file_name())
            .mime_str(&file.mime_type)?;

        let mut form = Form::new().part("file", part);
        if let Some(preset) = &self.config.upload_preset {
            form = form.text("upload_preset", preset.clone());
        }

        info!(
            "Uploading {} ({size} bytes) to {}",
            file.file_name(),
            self.config.upload_url
        );

        let response = self
            .http
            .post(&self.config.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Upload rejected with status {status}");
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let url = Self::parse_response(&body)?;
        info!("Upload stored at {url}");

        Ok(url)
    }
}
