//! Line item identity.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a cart line: product plus optional size.
///
/// Two adds with equal keys always land on the same line. A blank size is
/// the same as no size.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: Option<String>,
}

impl LineKey {
    pub fn new(product_id: ProductId, size: Option<&str>) -> Self {
        Self {
            product_id,
            size: normalize_size(size),
        }
    }

    /// Key for a product without a size.
    pub fn unsized_product(product_id: ProductId) -> Self {
        Self {
            product_id,
            size: None,
        }
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.size {
            Some(size) => write!(f, "{} ({})", self.product_id, size),
            None => write!(f, "{}", self.product_id),
        }
    }
}

pub(crate) fn normalize_size(size: Option<&str>) -> Option<String> {
    size.filter(|s| !s.is_empty()).map(str::to_string)
}
