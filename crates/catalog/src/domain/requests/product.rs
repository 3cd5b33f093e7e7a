use crate::{
    domain::requests::validation_error,
    model::product::{Category, Product, ProductRecord},
};
use shared::{domain::LocalFile, errors::ServiceError};
use validator::{Validate, ValidationError};

const FIELD_ORDER: [&str; 5] = ["name", "brand", "price", "quantity", "min_stock"];

/// Editable fields exactly as typed into the product form.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ProductFormValues {
    #[validate(custom(function = "validate_required", message = "Name is required"))]
    pub name: String,

    #[validate(custom(function = "validate_required", message = "Brand is required"))]
    pub brand: String,

    #[validate(custom(
        function = "validate_price",
        message = "Price must be a non-negative number"
    ))]
    pub price: String,

    pub category: Category,

    #[validate(custom(
        function = "validate_quantity",
        message = "Quantity must be a non-negative whole number"
    ))]
    pub quantity: String,

    #[validate(custom(
        function = "validate_min_stock",
        message = "Minimum stock must be a non-negative whole number"
    ))]
    pub min_stock: String,

    pub active: bool,
}

impl Default for ProductFormValues {
    fn default() -> Self {
        Self {
            name: String::new(),
            brand: String::new(),
            price: String::new(),
            category: Category::default(),
            quantity: String::new(),
            min_stock: String::new(),
            active: true,
        }
    }
}

impl From<&Product> for ProductFormValues {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: product.price.to_string(),
            category: product.category,
            quantity: product.quantity.to_string(),
            min_stock: product.min_stock.to_string(),
            active: product.active,
        }
    }
}

fn parse_price(value: &str) -> Option<f64> {
    let price: f64 = value.trim().replace(',', ".").parse().ok()?;
    // "-0" parses to negative zero.
    (price.is_finite() && price >= 0.0).then_some(price.abs())
}

fn parse_count(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn validate_price(value: &str) -> Result<(), ValidationError> {
    parse_price(value)
        .map(|_| ())
        .ok_or_else(|| ValidationError::new("price"))
}

fn validate_quantity(value: &str) -> Result<(), ValidationError> {
    parse_count(value)
        .map(|_| ())
        .ok_or_else(|| ValidationError::new("quantity"))
}

/// Blank means no threshold.
fn validate_min_stock(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    validate_quantity(value)
}

/// Validated, typed form contents ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub category: Category,
    pub quantity: u32,
    pub min_stock: u32,
    pub active: bool,
}

impl ProductDraft {
    pub fn into_record(self, image_url: Option<String>) -> ProductRecord {
        ProductRecord {
            name: self.name,
            brand: self.brand,
            price: self.price,
            category: self.category,
            quantity: self.quantity,
            min_stock: self.min_stock,
            active: self.active,
            image_url,
        }
    }
}

/// Create/edit form state: the values being edited, the snapshot they
/// started from, and the image selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    id: Option<String>,
    initial: ProductFormValues,
    pub values: ProductFormValues,
    existing_image_url: Option<String>,
    picked_image: Option<LocalFile>,
}

impl ProductForm {
    pub fn create() -> Self {
        Self {
            id: None,
            initial: ProductFormValues::default(),
            values: ProductFormValues::default(),
            existing_image_url: None,
            picked_image: None,
        }
    }

    pub fn edit(product: &Product) -> Self {
        let values = ProductFormValues::from(product);
        Self {
            id: Some(product.id.clone()),
            initial: values.clone(),
            values,
            existing_image_url: product.image_url.clone(),
            picked_image: None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn pick_image(&mut self, file: LocalFile) {
        self.picked_image = Some(file);
    }

    pub fn picked_image(&self) -> Option<&LocalFile> {
        self.picked_image.as_ref()
    }

    pub fn existing_image_url(&self) -> Option<&str> {
        self.existing_image_url.as_deref()
    }

    /// Any field differs from the starting snapshot, or a new image was picked.
    pub fn is_dirty(&self) -> bool {
        self.values != self.initial || self.picked_image.is_some()
    }

    /// Runs every rule and reports all failures at once.
    pub fn validate_draft(&self) -> Result<ProductDraft, ServiceError> {
        self.values
            .validate()
            .map_err(|errors| validation_error(&errors, &FIELD_ORDER))?;

        // Every numeric field passed validation, so the parses below succeed;
        // blank minimum stock is the only value that falls back to zero.
        let values = &self.values;
        Ok(ProductDraft {
            name: values.name.trim().to_string(),
            brand: values.brand.trim().to_string(),
            price: parse_price(&values.price).unwrap_or_default(),
            category: values.category,
            quantity: parse_count(&values.quantity).unwrap_or_default(),
            min_stock: parse_count(&values.min_stock).unwrap_or_default(),
            active: values.active,
        })
    }
}
