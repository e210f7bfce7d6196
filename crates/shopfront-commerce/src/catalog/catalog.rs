//! The immutable catalog a storefront session is built on.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::catalog::{group_by_category, CategoryGroup, Product, ProductConfig, SizeChart};
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Products, display categories and size charts.
///
/// Built once at startup and shared by reference; nothing in the catalog
/// changes while a session runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<String>,
    size_charts: Vec<SizeChart>,
}

impl Catalog {
    /// Create a catalog from products and the display order of categories.
    ///
    /// Every product must be priced in the base currency.
    pub fn new(products: Vec<Product>, categories: Vec<String>) -> Result<Self, CommerceError> {
        if let Some(product) = products.iter().find(|p| !p.is_base_priced()) {
            return Err(CommerceError::NonBasePrice {
                product_id: product.id.to_string(),
                currency: product.price.currency.code().to_string(),
            });
        }
        Ok(Self::assemble(products, categories))
    }

    /// Products must already be base-priced.
    pub(super) fn assemble(products: Vec<Product>, categories: Vec<String>) -> Self {
        Self {
            products,
            categories,
            size_charts: Vec::new(),
        }
    }

    /// Attach a size chart, replacing any chart for the same category.
    pub fn with_size_chart(mut self, chart: SizeChart) -> Self {
        self.size_charts.retain(|c| c.category != chart.category);
        self.size_charts.push(chart);
        self
    }

    /// Build a catalog from its file representation.
    ///
    /// Fails if two products share an id.
    pub fn from_config(config: CatalogConfig) -> Result<Self, CommerceError> {
        let mut seen = HashSet::new();
        for product in &config.products {
            if !seen.insert(product.id.as_str()) {
                return Err(CommerceError::Serialization(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
        }

        let products = config.products.into_iter().map(Product::from).collect();
        let mut catalog = Catalog::new(products, config.categories)?;
        for (category, sizes) in config.size_charts {
            catalog = catalog.with_size_chart(SizeChart::new(category, sizes));
        }
        Ok(catalog)
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Display categories in order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Look up a product by id.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// The size chart for a product's category, if it has one.
    pub fn size_chart(&self, product: &Product) -> Option<&SizeChart> {
        self.size_charts.iter().find(|c| c.category == product.category)
    }

    /// Size labels offered for a product; empty when it takes no size.
    pub fn sizes_for(&self, product: &Product) -> &[String] {
        self.size_chart(product)
            .map(|c| c.sizes.as_slice())
            .unwrap_or(&[])
    }

    /// Whether a product must be added with a size.
    pub fn requires_size(&self, product: &Product) -> bool {
        self.size_chart(product).is_some_and(SizeChart::requires_size)
    }

    /// Products grouped by display category.
    pub fn grouped(&self) -> Vec<CategoryGroup<'_>> {
        group_by_category(&self.products, &self.categories)
    }

    /// Products of a single category, in catalog order.
    pub fn in_category<'a>(&'a self, category: &str) -> Vec<&'a Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }
}

/// Catalog file layout.
///
/// ```toml
/// categories = ["T-Shirts", "Caps"]
///
/// [size_charts]
/// "T-Shirts" = ["S", "M", "L"]
///
/// [[products]]
/// id = "1"
/// name = "NHH SIGNATURE TEE"
/// price = 55.0
/// category = "T-Shirts"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Display order of categories.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Size labels per category.
    #[serde(default)]
    pub size_charts: BTreeMap<String, Vec<String>>,
    /// Products in catalog order.
    #[serde(default)]
    pub products: Vec<ProductConfig>,
}
