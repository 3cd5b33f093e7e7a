use anyhow::{Context, Result, anyhow};
use shared::service::MediaUploadConfig;
use std::fmt;

#[derive(Debug, Clone)]
pub enum MediaBackend {
    /// Unsigned multipart uploads to a hosted media service.
    Http(MediaUploadConfig),
    /// Process-local host handing out URLs under `public_base_url`.
    Memory { public_base_url: String },
}

#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"********")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub products_collection: String,
    pub media: MediaBackend,
    pub credentials: Credentials,
    pub seed_demo: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        let products_collection =
            std::env::var("PRODUCTS_COLLECTION").unwrap_or_else(|_| "products".to_string());

        let media = match std::env::var("MEDIA_UPLOAD_URL") {
            Ok(upload_url) => MediaBackend::Http(MediaUploadConfig {
                upload_url,
                upload_preset: std::env::var("MEDIA_UPLOAD_PRESET").ok(),
            }),
            Err(_) => MediaBackend::Memory {
                public_base_url: std::env::var("MEDIA_PUBLIC_BASE_URL")
                    .unwrap_or_else(|_| "https://media.local".to_string()),
            },
        };

        let email = std::env::var("STOREFRONT_EMAIL")
            .context("Missing environment variable: STOREFRONT_EMAIL")?;
        let password = std::env::var("STOREFRONT_PASSWORD")
            .context("Missing environment variable: STOREFRONT_PASSWORD")?;

        let seed_demo = match std::env::var("SEED_DEMO") {
            Err(_) => false,
            Ok(value) => match value.as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                other => {
                    return Err(anyhow!(
                        "SEED_DEMO must be 'true' or 'false', got '{}'",
                        other
                    ));
                }
            },
        };

        Ok(Self {
            products_collection,
            media,
            credentials: Credentials { email, password },
            seed_demo,
        })
    }
}
