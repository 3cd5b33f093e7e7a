use crate::{
    abstract_trait::{ConfirmPromptTrait, DynProductRepository},
    domain::{
        Alert, CategoryFilter, Confirmation, FilterState, StatusFilter, requests::ProductForm,
    },
    model::product::Product,
};
use anyhow::Result;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynMediaUpload,
    domain::{LocalFile, Session},
    errors::{ServiceError, StoreError},
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

pub struct CatalogControllerDeps {
    pub repository: DynProductRepository,
    pub media: DynMediaUpload,
    pub metrics: Metrics,
}

#[derive(Debug, Default)]
struct CatalogState {
    products: Vec<Product>,
    filter: FilterState,
    refreshing: bool,
    alert: Option<Alert>,
}

/// Clears the in-flight submit flag when the write finishes, however it ends.
struct SubmitGuard {
    flag: Arc<AtomicBool>,
}

impl SubmitGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self { flag: flag.clone() })
    }
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// View-state and write paths for the product catalog of one signed-in user.
///
/// Clones share the same state, so a refresh started from one clone and a
/// focus refetch from another both land in the same list; whichever
/// response arrives last wins. The state lock is never held across a
/// collaborator call.
#[derive(Clone)]
pub struct CatalogController {
    repository: DynProductRepository,
    media: DynMediaUpload,
    session: Session,
    state: Arc<Mutex<CatalogState>>,
    saving: Arc<AtomicBool>,
    metrics: Metrics,
}

impl CatalogController {
    pub fn new(deps: CatalogControllerDeps, session: Session) -> Self {
        let CatalogControllerDeps {
            repository,
            media,
            metrics,
        } = deps;

        info!("🛍️ Catalog opened for {}", session.email);

        Self {
            repository,
            media,
            session,
            state: Arc::new(Mutex::new(CatalogState::default())),
            saving: Arc::new(AtomicBool::new(false)),
            metrics,
        }
    }

    /// Builds the metric families shared by every controller and registers
    /// them once.
    pub fn register_metrics(registry: &mut Registry) -> Result<Metrics> {
        let metrics = Metrics::new();

        registry.register(
            "catalog_controller_request_counter",
            "Total number of catalog operations",
            metrics.request_counter.clone(),
        );
        registry.register(
            "catalog_controller_request_duration",
            "Histogram of catalog operation durations",
            metrics.request_duration.clone(),
        );

        Ok(metrics)
    }

    fn start_tracing(&self, operation_name: &str) -> TracingContext {
        TracingContext::start("catalog", operation_name)
    }

    fn complete_tracing_success(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        message: &str,
    ) {
        self.complete_tracing_internal(tracing_ctx, method, true, message);
    }

    fn complete_tracing_error(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        error_message: &str,
    ) {
        self.complete_tracing_internal(tracing_ctx, method, false, error_message);
    }

    fn complete_tracing_internal(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
        let status = if is_success {
            StatusUtils::Success
        } else {
            StatusUtils::Error
        };
        let elapsed = tracing_ctx.elapsed_secs();

        tracing_ctx.span.in_scope(|| {
            if is_success {
                info!("✅ Operation completed successfully: {message}");
            } else {
                error!("❌ Operation failed: {message}");
            }
        });

        self.metrics.record(method, status, elapsed);
    }

    async fn raise(&self, err: &ServiceError) {
        let alert = Alert::from(err);
        warn!("🔔 Alert raised: {} - {}", alert.title, alert.message);
        self.state.lock().await.alert = Some(alert);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Replaces the product list with a fresh read of the whole collection.
    /// On failure the current list is kept and an alert is raised.
    pub async fn fetch(&self) -> Result<usize, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.start_tracing("catalog_fetch");

        match self.repository.find_all().await {
            Ok(products) => {
                let count = products.len();
                self.state.lock().await.products = products;
                self.complete_tracing_success(
                    &tracing_ctx,
                    method,
                    &format!("Fetched {count} products"),
                );
                Ok(count)
            }
            Err(e) => {
                self.complete_tracing_error(
                    &tracing_ctx,
                    method,
                    &format!("Failed to fetch products: {e}"),
                );
                let err = ServiceError::from(e);
                self.raise(&err).await;
                Err(err)
            }
        }
    }

    /// Refetch triggered when the list view regains focus.
    pub async fn on_focus(&self) -> Result<usize, ServiceError> {
        info!("👀 Catalog focused, refetching");
        self.fetch().await
    }

    /// Pull-to-refresh: a fetch bracketed by the refreshing flag.
    pub async fn refresh(&self) -> Result<usize, ServiceError> {
        self.state.lock().await.refreshing = true;
        let result = self.fetch().await;
        self.state.lock().await.refreshing = false;
        result
    }

    pub async fn is_refreshing(&self) -> bool {
        self.state.lock().await.refreshing
    }

    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    /// Every fetched product, unfiltered, in store order.
    pub async fn products(&self) -> Vec<Product> {
        self.state.lock().await.products.clone()
    }

    /// Fetched products passing the current filter, recomputed on each call.
    pub async fn visible_products(&self) -> Vec<Product> {
        let state = self.state.lock().await;
        state.filter.apply(&state.products)
    }

    pub async fn low_stock(&self) -> Vec<Product> {
        self.state
            .lock()
            .await
            .products
            .iter()
            .filter(|product| product.is_low_stock())
            .cloned()
            .collect()
    }

    pub async fn filter(&self) -> FilterState {
        self.state.lock().await.filter.clone()
    }

    pub async fn set_category_filter(&self, category: CategoryFilter) {
        self.state.lock().await.filter.category = category;
    }

    pub async fn set_status_filter(&self, status: StatusFilter) {
        self.state.lock().await.filter.status = status;
    }

    pub async fn set_query(&self, query: impl Into<String>) {
        self.state.lock().await.filter.query = query.into();
    }

    pub async fn reset_filters(&self) {
        self.state.lock().await.filter = FilterState::default();
    }

    /// Removes and returns the pending alert, if any.
    pub async fn take_alert(&self) -> Option<Alert> {
        self.state.lock().await.alert.take()
    }

    /// Reads one product and seeds an edit form from it.
    pub async fn load_form(&self, id: &str) -> Result<ProductForm, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.start_tracing("catalog_load_form");

        match self.repository.find_by_id(id).await {
            Ok(Some(product)) => {
                self.complete_tracing_success(
                    &tracing_ctx,
                    method,
                    &format!("Loaded product {id} for editing"),
                );
                Ok(ProductForm::edit(&product))
            }
            Ok(None) => {
                self.complete_tracing_error(
                    &tracing_ctx,
                    method,
                    &format!("Product {id} not found"),
                );
                let err = ServiceError::Store(StoreError::NotFound);
                self.raise(&err).await;
                Err(err)
            }
            Err(e) => {
                self.complete_tracing_error(
                    &tracing_ctx,
                    method,
                    &format!("Failed to load product {id}: {e}"),
                );
                let err = ServiceError::from(e);
                self.raise(&err).await;
                Err(err)
            }
        }
    }

    /// Creates or updates the product behind `form` and returns its id.
    ///
    /// The picked image, if any, is uploaded first; the document is only
    /// written once a durable URL is in hand. The local list is not touched,
    /// the next focus refetch picks the change up.
    pub async fn save(&self, form: &ProductForm) -> Result<String, ServiceError> {
        let draft = match form.validate_draft() {
            Ok(draft) => draft,
            Err(err) => {
                info!("📝 Product form rejected by validation");
                self.raise(&err).await;
                return Err(err);
            }
        };

        let Some(_guard) = SubmitGuard::acquire(&self.saving) else {
            warn!("⏳ Save ignored, a submission is already in progress");
            return Err(ServiceError::SubmitInProgress);
        };

        let image_url = match form.picked_image() {
            Some(file) => Some(self.upload_image(file).await?),
            None => form.existing_image_url().map(str::to_string),
        };

        let record = draft.into_record(image_url);

        match form.id() {
            Some(id) => {
                let method = Method::Put;
                let tracing_ctx = self.start_tracing("catalog_update");

                match self.repository.update(id, &record).await {
                    Ok(()) => {
                        self.complete_tracing_success(
                            &tracing_ctx,
                            method,
                            &format!("Product {id} updated"),
                        );
                        Ok(id.to_string())
                    }
                    Err(e) => {
                        self.complete_tracing_error(
                            &tracing_ctx,
                            method,
                            &format!("Failed to update product {id}: {e}"),
                        );
                        let err = ServiceError::from(e);
                        self.raise(&err).await;
                        Err(err)
                    }
                }
            }
            None => {
                let method = Method::Post;
                let tracing_ctx = self.start_tracing("catalog_create");

                match self.repository.create(&record).await {
                    Ok(id) => {
                        self.complete_tracing_success(
                            &tracing_ctx,
                            method,
                            &format!("Product {id} created"),
                        );
                        Ok(id)
                    }
                    Err(e) => {
                        self.complete_tracing_error(
                            &tracing_ctx,
                            method,
                            &format!("Failed to create product '{}': {e}", record.name),
                        );
                        let err = ServiceError::from(e);
                        self.raise(&err).await;
                        Err(err)
                    }
                }
            }
        }
    }

    async fn upload_image(&self, file: &LocalFile) -> Result<String, ServiceError> {
        let method = Method::Upload;
        let tracing_ctx = self.start_tracing("catalog_upload_image");

        match self.media.upload(file).await {
            Ok(url) => {
                self.complete_tracing_success(
                    &tracing_ctx,
                    method,
                    &format!("Uploaded {} to {url}", file.file_name()),
                );
                Ok(url)
            }
            Err(e) => {
                self.complete_tracing_error(
                    &tracing_ctx,
                    method,
                    &format!("Failed to upload {}: {e}", file.file_name()),
                );
                let err = ServiceError::from(e);
                self.raise(&err).await;
                Err(err)
            }
        }
    }

    /// Deletes a product after the user confirms, then refetches the list.
    ///
    /// Returns `Ok(false)` when the user declines. A failed delete raises an
    /// alert and skips the refetch; a failed refetch raises its own alert but
    /// the delete still counts as done.
    pub async fn delete(
        &self,
        id: &str,
        prompt: &(dyn ConfirmPromptTrait + Send + Sync),
    ) -> Result<bool, ServiceError> {
        let name = self
            .state
            .lock()
            .await
            .products
            .iter()
            .find(|product| product.id == id)
            .map(|product| product.name.clone());

        if !prompt
            .confirm(&Confirmation::delete_product(name.as_deref()))
            .await
        {
            info!("🙅 Delete of product {id} cancelled");
            return Ok(false);
        }

        let method = Method::Delete;
        let tracing_ctx = self.start_tracing("catalog_delete");

        if let Err(e) = self.repository.delete(id).await {
            self.complete_tracing_error(
                &tracing_ctx,
                method,
                &format!("Failed to delete product {id}: {e}"),
            );
            let err = ServiceError::from(e);
            self.raise(&err).await;
            return Err(err);
        }

        self.complete_tracing_success(&tracing_ctx, method, &format!("Product {id} deleted"));

        if let Err(e) = self.fetch().await {
            warn!("⚠️ Product {id} deleted but the list could not be refreshed: {e}");
        }

        Ok(true)
    }

    /// Decides whether leaving the form may go ahead. A clean form is
    /// discarded silently; a dirty one needs the user's confirmation.
    pub async fn cancel_form(
        &self,
        form: &ProductForm,
        prompt: &(dyn ConfirmPromptTrait + Send + Sync),
    ) -> bool {
        if !form.is_dirty() {
            return true;
        }

        let discard = prompt.confirm(&Confirmation::discard_changes()).await;
        info!("📝 Unsaved product form {}", if discard { "discarded" } else { "kept" });
        discard
    }
}
