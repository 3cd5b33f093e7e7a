use crate::{
    abstract_trait::DynProductRepository,
    repository::DocumentProductRepository,
    service::{AccountService, CatalogController, CatalogControllerDeps},
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynAuthProvider, DynDocumentStore, DynMediaUpload},
    domain::Session,
    utils::Metrics,
};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub store: DynDocumentStore,
    pub product_repository: DynProductRepository,
    pub media: DynMediaUpload,
    pub account: AccountService,
    catalog_metrics: Metrics,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("store", &"DynDocumentStore")
            .field("product_repository", &"DocumentProductRepository")
            .field("media", &"DynMediaUpload")
            .field("account", &"AccountService")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub store: DynDocumentStore,
    pub media: DynMediaUpload,
    pub auth: DynAuthProvider,
    pub products_collection: String,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Result<Self> {
        let DependenciesInjectDeps {
            store,
            media,
            auth,
            products_collection,
        } = deps;

        let product_repository = Arc::new(DocumentProductRepository::new(
            store.clone(),
            products_collection,
        ));

        let account =
            AccountService::new(auth, registry).context("failed initialize account service")?;

        let catalog_metrics = CatalogController::register_metrics(registry)
            .context("failed initialize catalog metrics")?;

        Ok(Self {
            store,
            product_repository,
            media,
            account,
            catalog_metrics,
        })
    }

    /// A fresh catalog view for `session`, with default filters.
    pub fn catalog(&self, session: Session) -> CatalogController {
        let deps = CatalogControllerDeps {
            repository: self.product_repository.clone(),
            media: self.media.clone(),
            metrics: self.catalog_metrics.clone(),
        };

        CatalogController::new(deps, session)
    }
}
