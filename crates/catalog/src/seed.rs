use crate::{domain::requests::ProductForm, model::product::Category, service::CatalogController};
use shared::errors::ServiceError;
use tracing::info;

const DEMO_PRODUCTS: [(&str, &str, &str, Category, &str, &str, bool); 5] = [
    ("Keratin Shampoo", "Silk Lab", "89.90", Category::Hair, "14", "5", true),
    ("Vitamin C Serum", "Glow", "129,00", Category::Skin, "3", "4", true),
    ("Gel Polish Red", "Nailed It", "34.5", Category::Nails, "0", "6", true),
    ("Matte Lipstick", "Velvet", "49.9", Category::Makeup, "22", "", false),
    ("Detangling Brush", "Acme", "25", Category::Accessories, "50", "10", true),
];

pub fn demo_forms() -> Vec<ProductForm> {
    DEMO_PRODUCTS
        .iter()
        .map(
            |&(name, brand, price, category, quantity, min_stock, active)| {
                let mut form = ProductForm::create();
                form.values.name = name.to_string();
                form.values.brand = brand.to_string();
                form.values.price = price.to_string();
                form.values.category = category;
                form.values.quantity = quantity.to_string();
                form.values.min_stock = min_stock.to_string();
                form.values.active = active;
                form
            },
        )
        .collect()
}

/// Writes the demo products through the regular save path when the
/// catalog is empty. Returns how many were written.
pub async fn seed_demo(catalog: &CatalogController) -> Result<usize, ServiceError> {
    if catalog.fetch().await? > 0 {
        info!("🌱 Catalog already has products, skipping demo seed");
        return Ok(0);
    }

    let forms = demo_forms();
    for form in &forms {
        catalog.save(form).await?;
    }

    info!("🌱 Seeded {} demo products", forms.len());
    Ok(forms.len())
}
