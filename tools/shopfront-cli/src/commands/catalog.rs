//! List the catalog grouped by category.

use anyhow::Result;
use serde::Serialize;
use shopfront_commerce::catalog::{Catalog, CategoryGroup};
use shopfront_commerce::Currency;

use super::{display_currency, CatalogArgs};
use crate::context::Context;

const COLUMNS: [usize; 3] = [6, 46, 12];

#[derive(Serialize)]
struct ProductRow<'a> {
    id: &'a str,
    name: &'a str,
    price: String,
    sizes: &'a [String],
}

#[derive(Serialize)]
struct GroupRow<'a> {
    category: &'a str,
    products: Vec<ProductRow<'a>>,
}

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let currency = display_currency(args.currency.as_deref(), ctx);

    let groups = match args.category.as_deref() {
        None => catalog.grouped(),
        Some(category) => {
            let group = single_group(&catalog, category);
            if !catalog.categories().iter().any(|c| c == category) {
                ctx.output.warn(&format!(
                    "Unknown category '{}'. Available: {}",
                    category,
                    catalog.categories().join(", ")
                ));
            }
            vec![group]
        }
    };

    let rows = rows(&catalog, &groups, currency);

    if ctx.output.is_json() {
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} catalog ({})",
        ctx.config.shop.name,
        currency.display_name()
    ));
    for group in &rows {
        ctx.output.info("");
        ctx.output.info(group.category);
        if group.products.is_empty() {
            ctx.output.list_item("No products");
            continue;
        }
        for product in &group.products {
            let sizes = if product.sizes.is_empty() {
                "-".to_string()
            } else {
                product.sizes.join(" ")
            };
            ctx.output
                .table_row(&[product.id, product.name, &product.price, &sizes], &COLUMNS);
        }
    }

    Ok(())
}

/// One category's products; empty unless the category is in the display order.
fn single_group<'a>(catalog: &'a Catalog, category: &'a str) -> CategoryGroup<'a> {
    let listed = catalog.categories().iter().any(|c| c == category);
    CategoryGroup {
        category,
        products: if listed { catalog.in_category(category) } else { Vec::new() },
    }
}

fn rows<'a>(catalog: &'a Catalog, groups: &[CategoryGroup<'a>], currency: Currency) -> Vec<GroupRow<'a>> {
    groups
        .iter()
        .map(|group| GroupRow {
            category: group.category,
            products: group
                .products
                .iter()
                .map(|&product| ProductRow {
                    id: product.id.as_str(),
                    name: &product.name,
                    price: product.price.convert_to(currency).display(),
                    sizes: catalog.sizes_for(product),
                })
                .collect(),
        })
        .collect()
}
