use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Hair,
    Skin,
    Nails,
    Makeup,
    Fragrance,
    Accessories,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Hair,
        Category::Skin,
        Category::Nails,
        Category::Makeup,
        Category::Fragrance,
        Category::Accessories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hair => "Hair",
            Category::Skin => "Skin",
            Category::Nails => "Nails",
            Category::Makeup => "Makeup",
            Category::Fragrance => "Fragrance",
            Category::Accessories => "Accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field set persisted in the document store, without the identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub category: Category,
    pub quantity: u32,
    #[serde(default)]
    pub min_stock: u32,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub category: Category,
    pub quantity: u32,
    pub min_stock: u32,
    pub active: bool,
    pub image_url: Option<String>,
}

impl Product {
    pub fn from_record(id: impl Into<String>, record: ProductRecord) -> Self {
        Self {
            id: id.into(),
            name: record.name,
            brand: record.brand,
            price: record.price,
            category: record.category,
            quantity: record.quantity,
            min_stock: record.min_stock,
            active: record.active,
            image_url: record.image_url,
        }
    }

    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock
    }
}
