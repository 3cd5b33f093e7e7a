use async_trait::async_trait;
use catalog::{
    abstract_trait::{MockConfirmPromptTrait, ProductRepositoryTrait},
    domain::{CategoryFilter, StatusFilter, requests::ProductForm},
    model::product::{Category, Product, ProductRecord},
    repository::DocumentProductRepository,
    service::{CatalogController, CatalogControllerDeps},
};
use shared::{
    abstract_trait::{
        DocumentStoreTrait, DynMediaUpload, MediaUploadTrait, MockDocumentStoreTrait,
        MockMediaUploadTrait,
    },
    domain::{LocalFile, Session},
    errors::{ServiceError, StoreError, UploadError},
    repository::MemoryDocumentStore,
    service::MemoryMediaHost,
    utils::Metrics,
};
use std::{collections::VecDeque, sync::Arc};
use testresult::TestResult;
use tokio::sync::{Mutex, Notify, mpsc};

fn controller(
    repository: Arc<dyn ProductRepositoryTrait + Send + Sync>,
    media: DynMediaUpload,
) -> CatalogController {
    let deps = CatalogControllerDeps {
        repository,
        media,
        metrics: Metrics::new(),
    };
    CatalogController::new(deps, Session::new("owner-1", "owner@salon.test"))
}

fn memory_controller(store: Arc<MemoryDocumentStore>) -> CatalogController {
    controller(
        Arc::new(DocumentProductRepository::new(store, "products")),
        Arc::new(MemoryMediaHost::new("https://media.test")),
    )
}

fn product_form(name: &str, price: &str, quantity: &str) -> ProductForm {
    let mut form = ProductForm::create();
    form.values.name = name.to_string();
    form.values.brand = "Salon Pro".to_string();
    form.values.price = price.to_string();
    form.values.category = Category::Hair;
    form.values.quantity = quantity.to_string();
    form
}

fn product(id: &str, name: &str) -> Product {
    Product::from_record(
        id,
        ProductRecord {
            name: name.to_string(),
            brand: "Salon Pro".to_string(),
            price: 10.0,
            category: Category::Hair,
            quantity: 1,
            min_stock: 0,
            active: true,
            image_url: None,
        },
    )
}

fn ids(products: &[Product]) -> Vec<String> {
    products.iter().map(|p| p.id.clone()).collect()
}

#[tokio::test]
async fn failed_upload_writes_nothing_to_the_store() {
    let mut store = MockDocumentStoreTrait::new();
    store.expect_add().never();
    store.expect_update().never();

    let mut media = MockMediaUploadTrait::new();
    media
        .expect_upload()
        .times(1)
        .returning(|_| {
            Err(UploadError::Rejected {
                status: 500,
                body: "boom".into(),
            })
        });

    let catalog = controller(
        Arc::new(DocumentProductRepository::new(Arc::new(store), "products")),
        Arc::new(media),
    );

    let mut form = product_form("Argan Oil", "59.90", "4");
    form.pick_image(LocalFile::image("/photos/argan.jpg"));
    let result = catalog.save(&form).await;

    assert!(matches!(result, Err(ServiceError::Upload(_))), "got {result:?}");
    assert!(!catalog.is_saving());
}

#[tokio::test]
async fn editing_without_a_new_image_keeps_the_stored_url() -> TestResult {
    let store = Arc::new(MemoryDocumentStore::new());
    let mut media = MockMediaUploadTrait::new();
    media
        .expect_upload()
        .times(1)
        .returning(|_| Ok("https://media.test/argan.jpg".to_string()));
    let catalog = controller(
        Arc::new(DocumentProductRepository::new(store.clone(), "products")),
        Arc::new(media),
    );

    let mut form = product_form("Argan Oil", "59.90", "4");
    form.pick_image(LocalFile::image("/photos/argan.jpg"));
    let id = catalog.save(&form).await?;

    let mut edit = catalog.load_form(&id).await?;
    edit.values.price = "64.90".to_string();
    assert!(edit.is_dirty());
    let saved_id = catalog.save(&edit).await?;

    let document = store.get("products", &id).await?.ok_or("missing document")?;
    assert_eq!(saved_id, id);
    assert_eq!(
        document.fields.get("imageUrl").and_then(|v| v.as_str()),
        Some("https://media.test/argan.jpg")
    );
    assert_eq!(
        document.fields.get("price").and_then(|v| v.as_f64()),
        Some(64.9)
    );

    Ok(())
}

#[tokio::test]
async fn failed_write_after_upload_alerts_and_leaves_the_list_alone() -> TestResult {
    let store = Arc::new(MemoryDocumentStore::new());
    let media = Arc::new(MemoryMediaHost::new("https://media.test"));
    let catalog = controller(
        Arc::new(DocumentProductRepository::new(store.clone(), "products")),
        media.clone(),
    );
    catalog.save(&product_form("Shampoo", "30", "5")).await?;
    catalog.fetch().await?;
    let before = catalog.products().await;

    store.set_offline(true);
    let mut form = product_form("Argan Oil", "59.90", "4");
    form.pick_image(LocalFile::image("/photos/argan.jpg"));
    let result = catalog.save(&form).await;

    assert!(matches!(result, Err(ServiceError::Store(_))), "got {result:?}");
    assert!(!catalog.is_saving());
    assert_eq!(catalog.products().await, before);
    let alert = catalog.take_alert().await.ok_or("expected an alert")?;
    assert_eq!(alert.title, "Error");
    assert_eq!(media.uploaded().await.len(), 1);

    Ok(())
}

#[tokio::test]
async fn confirmed_delete_is_gone_after_the_refetch() -> TestResult {
    let store = Arc::new(MemoryDocumentStore::new());
    let catalog = memory_controller(store.clone());
    let keep = catalog.save(&product_form("Shampoo", "30", "5")).await?;
    let remove = catalog.save(&product_form("Conditioner", "32", "5")).await?;
    catalog.fetch().await?;

    let mut prompt = MockConfirmPromptTrait::new();
    prompt
        .expect_confirm()
        .withf(|request| request.confirm_label == "Delete")
        .times(1)
        .returning(|_| true);

    assert!(catalog.delete(&remove, &prompt).await?);

    assert_eq!(ids(&catalog.products().await), vec![keep]);
    assert_eq!(store.get("products", &remove).await?, None);

    Ok(())
}

#[tokio::test]
async fn failed_delete_skips_the_refetch_and_alerts() -> TestResult {
    let store = Arc::new(MemoryDocumentStore::new());
    let catalog = memory_controller(store.clone());
    let id = catalog.save(&product_form("Shampoo", "30", "5")).await?;
    catalog.fetch().await?;

    let mut prompt = MockConfirmPromptTrait::new();
    prompt.expect_confirm().times(1).returning(|_| true);

    store.set_offline(true);
    let result = catalog.delete(&id, &prompt).await;

    assert!(matches!(result, Err(ServiceError::Store(_))), "got {result:?}");
    assert_eq!(ids(&catalog.products().await), vec![id]);
    assert!(catalog.take_alert().await.is_some());

    Ok(())
}

#[tokio::test]
async fn cancel_prompts_only_for_dirty_forms() -> TestResult {
    let store = Arc::new(MemoryDocumentStore::new());
    let catalog = memory_controller(store);
    let id = catalog.save(&product_form("Shampoo", "30", "5")).await?;

    let mut silent = MockConfirmPromptTrait::new();
    silent.expect_confirm().never();
    assert!(catalog.cancel_form(&ProductForm::create(), &silent).await);
    assert!(catalog.cancel_form(&catalog.load_form(&id).await?, &silent).await);

    let mut declining = MockConfirmPromptTrait::new();
    declining
        .expect_confirm()
        .withf(|request| request.confirm_label == "Discard")
        .times(2)
        .returning(|_| false);

    let mut edited = catalog.load_form(&id).await?;
    edited.values.active = false;
    assert!(!catalog.cancel_form(&edited, &declining).await);

    let mut with_image = ProductForm::create();
    with_image.pick_image(LocalFile::image("/photos/new.jpg"));
    assert!(!catalog.cancel_form(&with_image, &declining).await);

    Ok(())
}

#[tokio::test]
async fn invalid_forms_touch_no_collaborator() {
    let mut store = MockDocumentStoreTrait::new();
    store.expect_add().never();
    store.expect_update().never();
    let mut media = MockMediaUploadTrait::new();
    media.expect_upload().never();
    let catalog = controller(
        Arc::new(DocumentProductRepository::new(Arc::new(store), "products")),
        Arc::new(media),
    );

    let mut form = product_form("  ", "-3", "two");
    form.pick_image(LocalFile::image("/photos/x.jpg"));
    let result = catalog.save(&form).await;

    match result {
        Err(ServiceError::Validation(messages)) => assert_eq!(messages.len(), 3),
        other => panic!("expected validation error, got {other:?}"),
    }
    let alert = catalog.take_alert().await;
    assert_eq!(
        alert.map(|a| a.title),
        Some("Missing information".to_string())
    );
}

#[tokio::test]
async fn store_failure_keeps_the_current_list() -> TestResult {
    let store = Arc::new(MemoryDocumentStore::new());
    let catalog = memory_controller(store.clone());
    catalog.save(&product_form("Shampoo", "30", "5")).await?;
    catalog.save(&product_form("Mask", "45", "2")).await?;
    catalog.fetch().await?;
    let before = catalog.products().await;

    store.set_offline(true);
    let result = catalog.on_focus().await;

    assert!(
        matches!(result, Err(ServiceError::Store(StoreError::Unavailable(_)))),
        "got {result:?}"
    );
    assert_eq!(catalog.products().await, before);
    let alert = catalog.take_alert().await.ok_or("expected an alert")?;
    assert_eq!(alert.title, "Error");

    Ok(())
}

#[tokio::test]
async fn filters_reset_when_the_view_is_rebuilt() -> TestResult {
    let store = Arc::new(MemoryDocumentStore::new());
    let catalog = memory_controller(store.clone());
    catalog
        .set_category_filter(CategoryFilter::Only(Category::Nails))
        .await;
    catalog.set_status_filter(StatusFilter::Inactive).await;
    catalog.set_query("polish").await;
    assert!(!catalog.filter().await.is_identity());

    let rebuilt = memory_controller(store);
    assert!(rebuilt.filter().await.is_identity());

    Ok(())
}

/// Repository whose `find_all` calls block until released, one gate per
/// call in call order.
struct GatedRepository {
    responses: Mutex<VecDeque<(Arc<Notify>, Vec<Product>)>>,
    started: mpsc::UnboundedSender<usize>,
    calls: Mutex<usize>,
}

#[async_trait]
impl ProductRepositoryTrait for GatedRepository {
    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        let (gate, products) = self
            .responses
            .lock()
            .await
            .pop_front()
            .ok_or(StoreError::Unavailable("no scripted response".into()))?;

        let call = {
            let mut calls = self.calls.lock().await;
            *calls += 1;
            *calls
        };
        let _ = self.started.send(call);

        gate.notified().await;
        Ok(products)
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Product>, StoreError> {
        Ok(None)
    }

    async fn create(&self, _record: &ProductRecord) -> Result<String, StoreError> {
        Err(StoreError::Custom("read-only".into()))
    }

    async fn update(&self, _id: &str, _record: &ProductRecord) -> Result<(), StoreError> {
        Err(StoreError::Custom("read-only".into()))
    }

    async fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::Custom("read-only".into()))
    }
}

#[tokio::test]
async fn overlapping_fetches_keep_the_last_response_to_arrive() -> TestResult {
    let first_gate = Arc::new(Notify::new());
    let second_gate = Arc::new(Notify::new());
    let (started_tx, mut started_rx) = mpsc::unbounded_channel();

    let repository = Arc::new(GatedRepository {
        responses: Mutex::new(VecDeque::from([
            (first_gate.clone(), vec![product("old", "Stale")]),
            (second_gate.clone(), vec![product("new", "Fresh")]),
        ])),
        started: started_tx,
        calls: Mutex::new(0),
    });
    let catalog = controller(
        repository,
        Arc::new(MemoryMediaHost::new("https://media.test")),
    );

    let first = tokio::spawn({
        let catalog = catalog.clone();
        async move { catalog.on_focus().await }
    });
    assert_eq!(started_rx.recv().await, Some(1));

    let second = tokio::spawn({
        let catalog = catalog.clone();
        async move { catalog.refresh().await }
    });
    assert_eq!(started_rx.recv().await, Some(2));

    second_gate.notify_one();
    second.await??;
    assert_eq!(ids(&catalog.products().await), vec!["new".to_string()]);

    first_gate.notify_one();
    first.await??;
    assert_eq!(ids(&catalog.products().await), vec!["old".to_string()]);

    Ok(())
}

/// Media host whose uploads wait for a release signal.
struct SlowMediaHost {
    started: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl MediaUploadTrait for SlowMediaHost {
    async fn upload(&self, file: &LocalFile) -> Result<String, UploadError> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(format!("https://media.test/{}", file.file_name()))
    }
}

#[tokio::test]
async fn second_submit_is_rejected_while_saving() -> TestResult {
    let started = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let store = Arc::new(MemoryDocumentStore::new());
    let catalog = controller(
        Arc::new(DocumentProductRepository::new(store.clone(), "products")),
        Arc::new(SlowMediaHost {
            started: started.clone(),
            release: release.clone(),
        }),
    );

    let mut form = product_form("Argan Oil", "59.90", "4");
    form.pick_image(LocalFile::image("/photos/argan.jpg"));

    let pending = tokio::spawn({
        let catalog = catalog.clone();
        let form = form.clone();
        async move { catalog.save(&form).await }
    });
    started.notified().await;
    assert!(catalog.is_saving());

    let rejected = catalog.save(&form).await;
    assert!(
        matches!(rejected, Err(ServiceError::SubmitInProgress)),
        "got {rejected:?}"
    );

    release.notify_one();
    let id = pending.await??;

    assert!(!catalog.is_saving());
    assert_eq!(store.list_all("products").await?.len(), 1);
    assert!(store.get("products", &id).await?.is_some());

    Ok(())
}
