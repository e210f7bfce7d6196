//! Product types.

use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Products are defined once when the catalog is built and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Price in the base currency.
    pub price: Money,
    /// Image reference (opaque to the core).
    pub image: String,
    /// Short marketing description.
    pub description: String,
    /// Category name, matched exactly by the category filter.
    pub category: String,
}

impl Product {
    /// Create a new product priced in whole base-currency units.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: String::new(),
            description: String::new(),
            category: category.into(),
        }
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check whether the price is in the base currency.
    pub fn is_base_priced(&self) -> bool {
        self.price.currency == Currency::BASE
    }
}

/// Serialized form of a product in a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductConfig {
    pub id: String,
    pub name: String,
    /// Price in base-currency units (e.g., 55.0).
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
}

impl From<ProductConfig> for Product {
    fn from(config: ProductConfig) -> Self {
        Product::new(
            config.id,
            config.name,
            Money::from_decimal(config.price, Currency::BASE),
            config.category,
        )
        .with_image(config.image)
        .with_description(config.description)
    }
}
