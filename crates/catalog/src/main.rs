use anyhow::{Context, Result};
use catalog::{
    config::myconfig::Config,
    domain::{CategoryFilter, StatusFilter, requests::LoginRequest, requests::RegisterRequest},
    model::product::Category,
    seed,
    service::CatalogController,
    state::AppState,
};
use prometheus_client::encoding::text::encode;
use shared::{
    errors::{AuthError, ServiceError},
    utils::init_logger,
};
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let state = setup().context("Failed to setup application")?;

    sign_in(&state).await.context("Failed to sign in")?;

    let catalog = state
        .catalog()
        .context("Catalog requires a signed-in session")?;

    watch_collection(&state);

    if state.config.seed_demo {
        seed::seed_demo(&catalog)
            .await
            .context("Failed to seed demo products")?;
    }

    report(&catalog).await;

    let mut metrics = String::new();
    encode(&mut metrics, &state.registry).context("Failed to encode metrics")?;
    debug!("📊 Metrics snapshot:\n{metrics}");

    state.sign_out().await.context("Failed to sign out")?;

    info!("✅ Storefront session complete.");
    Ok(())
}

fn setup() -> Result<AppState> {
    dotenv::dotenv().ok();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let is_enable_file = std::env::var("ENABLE_FILE_LOG")
        .map(|v| v == "true")
        .unwrap_or(false);

    init_logger("catalog", is_dev, is_enable_file);

    info!("🚀 Starting storefront catalog...");

    let config = Config::init().context("Failed to load configuration")?;
    let state = AppState::new(config).context("Failed to create AppState")?;

    info!("✅ Application setup completed successfully.");
    Ok(state)
}

/// Signs in with the configured account, registering it first when the
/// auth provider does not know it yet.
async fn sign_in(state: &AppState) -> Result<()> {
    let credentials = &state.config.credentials;
    let account = &state.di_container.account;

    let login = LoginRequest {
        email: credentials.email.clone(),
        password: credentials.password.clone(),
    };

    match account.sign_in(&login).await {
        Ok(session) => {
            info!("🔐 Signed in as {}", session.email);
            Ok(())
        }
        Err(ServiceError::Auth(AuthError::UserNotFound)) => {
            warn!("👤 No account for {}, registering", credentials.email);
            let session = account
                .sign_up(&RegisterRequest {
                    email: credentials.email.clone(),
                    password: credentials.password.clone(),
                    confirm_password: credentials.password.clone(),
                })
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            info!("🔐 Registered and signed in as {}", session.email);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(e.user_message())),
    }
}

/// Logs every snapshot the document store pushes for the products
/// collection.
fn watch_collection(state: &AppState) {
    let collection = state.config.products_collection.clone();

    let Some(mut rx) = state.di_container.store.subscribe(&collection) else {
        debug!("Document store offers no live updates for {collection}");
        return;
    };

    tokio::spawn(async move {
        while let Ok(snapshot) = rx.recv().await {
            debug!(
                "🔄 {} now holds {} documents",
                snapshot.collection,
                snapshot.documents.len()
            );
        }
    });
}

async fn report(catalog: &CatalogController) {
    if let Err(e) = catalog.on_focus().await {
        error!("❌ Could not load the catalog: {e}");
        if let Some(alert) = catalog.take_alert().await {
            error!("{}: {}", alert.title, alert.message);
        }
        return;
    }

    for product in catalog.visible_products().await {
        info!(
            "📦 {} ({}) - {} - {:.2} - qty {}{}",
            product.name,
            product.brand,
            product.category,
            product.price,
            product.quantity,
            if product.active { "" } else { " [inactive]" }
        );
    }

    catalog.set_status_filter(StatusFilter::Active).await;
    info!(
        "🟢 {} active products",
        catalog.visible_products().await.len()
    );
    catalog.reset_filters().await;

    for category in Category::ALL {
        catalog
            .set_category_filter(CategoryFilter::Only(category))
            .await;
        let count = catalog.visible_products().await.len();
        if count > 0 {
            info!("🏷️ {category}: {count} products");
        }
    }
    catalog.reset_filters().await;

    for product in catalog.low_stock().await {
        warn!(
            "⚠️ Low stock: {} has {} left (minimum {})",
            product.name, product.quantity, product.min_stock
        );
    }
}
