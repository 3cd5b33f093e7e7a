use crate::model::product::{Category, Product};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

/// Transient list filters. Starts empty every time a catalog view is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub status: StatusFilter,
    pub query: String,
}

impl FilterState {
    pub fn is_identity(&self) -> bool {
        self.category == CategoryFilter::All
            && self.status == StatusFilter::All
            && self.query.is_empty()
    }

    /// True when the product passes the category, status and text predicates.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_category(product)
            && self.matches_status(product)
            && self.matches_query(product)
    }

    /// Products passing [`FilterState::matches`], in their original order.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|product| self.matches(product))
            .cloned()
            .collect()
    }

    fn matches_category(&self, product: &Product) -> bool {
        match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category == category,
        }
    }

    fn matches_status(&self, product: &Product) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Active => product.active,
            StatusFilter::Inactive => !product.active,
        }
    }

    fn matches_query(&self, product: &Product) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();

        product.name.to_lowercase().contains(&needle)
            || product.price.to_string().contains(&needle)
            || product.quantity.to_string().contains(&needle)
    }
}
