//! Product catalog module.
//!
//! Contains products, size charts, the category filter and the immutable
//! catalog value sessions are built on.

mod builtin;
mod catalog;
mod category;
mod product;

pub use catalog::{Catalog, CatalogConfig};
pub use category::{group_by_category, CategoryGroup, SizeChart};
pub use product::{Product, ProductConfig};
