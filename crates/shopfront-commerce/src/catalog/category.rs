//! Category grouping and size charts.

use crate::catalog::Product;
use serde::Serialize;

/// Products belonging to one display category, in catalog order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryGroup<'a> {
    /// Category name.
    pub category: &'a str,
    /// Products whose category equals `category` exactly.
    pub products: Vec<&'a Product>,
}

impl CategoryGroup<'_> {
    /// Check if no product matched this category.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Partition `products` into one group per entry of `categories`.
///
/// Groups follow the order of `categories`; products inside a group keep
/// their relative order from `products`. Categories with no products still
/// produce an empty group, and products whose category is not listed are
/// left out.
pub fn group_by_category<'a, S: AsRef<str>>(
    products: &'a [Product],
    categories: &'a [S],
) -> Vec<CategoryGroup<'a>> {
    categories
        .iter()
        .map(|category| {
            let category = category.as_ref();
            CategoryGroup {
                category,
                products: products.iter().filter(|p| p.category == category).collect(),
            }
        })
        .collect()
}

/// Ordered size labels offered for one category.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SizeChart {
    pub category: String,
    pub sizes: Vec<String>,
}

impl SizeChart {
    pub fn new<I, S>(category: impl Into<String>, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category: category.into(),
            sizes: sizes.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether shoppers must pick a size for this category.
    pub fn requires_size(&self) -> bool {
        !self.sizes.is_empty()
    }

    /// Check if a size label is on the chart.
    pub fn offers(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }
}
