use crate::{
    config::myconfig::{Config, MediaBackend},
    di::{DependenciesInject, DependenciesInjectDeps},
    service::CatalogController,
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynAuthProvider, DynDocumentStore, DynMediaUpload},
    errors::ServiceError,
    repository::MemoryDocumentStore,
    service::{HttpMediaUploader, MemoryAuthProvider, MemoryMediaHost},
    state::SessionState,
};
use std::{fmt, sync::Arc};
use tracing::info;

pub struct AppState {
    pub config: Config,
    pub di_container: DependenciesInject,
    pub registry: Arc<Registry>,
    pub session: SessionState,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("di_container", &self.di_container)
            .field("registry", &self.registry)
            .field("session", &self.session)
            .finish()
    }
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let store: DynDocumentStore = Arc::new(MemoryDocumentStore::new());
        let auth: DynAuthProvider = Arc::new(MemoryAuthProvider::new());

        let media: DynMediaUpload = match &config.media {
            MediaBackend::Http(upload) => {
                info!("📤 Uploading media to {}", upload.upload_url);
                Arc::new(HttpMediaUploader::new(upload.clone()))
            }
            MediaBackend::Memory { public_base_url } => {
                info!("📤 Using in-memory media host at {public_base_url}");
                Arc::new(MemoryMediaHost::new(public_base_url.clone()))
            }
        };

        Self::with_collaborators(config, store, media, auth)
    }

    pub fn with_collaborators(
        config: Config,
        store: DynDocumentStore,
        media: DynMediaUpload,
        auth: DynAuthProvider,
    ) -> Result<Self> {
        let mut registry = Registry::default();

        let session = SessionState::init(auth.clone());

        let deps = DependenciesInjectDeps {
            store,
            media,
            auth,
            products_collection: config.products_collection.clone(),
        };

        let di_container = DependenciesInject::new(deps, &mut registry)
            .context("Failed to initialize dependency injection container")?;

        Ok(Self {
            config,
            di_container,
            registry: Arc::new(registry),
            session,
        })
    }

    /// A catalog view for the signed-in user.
    pub fn catalog(&self) -> Result<CatalogController, ServiceError> {
        let session = self.session.current().ok_or(ServiceError::Unauthenticated)?;
        Ok(self.di_container.catalog(session))
    }

    /// Signs out and tears the session state down.
    pub async fn sign_out(self) -> Result<(), ServiceError> {
        self.di_container.account.sign_out(self.session).await
    }
}
