//! The storefront's built-in catalog.

use crate::catalog::{Catalog, Product, SizeChart};
use crate::money::Money;

const APPAREL_SIZES: [&str; 6] = ["XS", "S", "M", "L", "XL", "XXL"];
const CROP_TOP_SIZES: [&str; 5] = ["XS", "S", "M", "L", "XL"];
const TWITTER_LINE: &str = "They don't understand the things I say on Twitter";

impl Catalog {
    /// The catalog shipped with the storefront.
    ///
    /// Beanies are stocked but not in the display order, so the category
    /// grouping never shows them.
    pub fn builtin() -> Self {
        let products = vec![
            product("1", "NHH SIGNATURE TEE", 55, "T-Shirts", "Premium minimalist design"),
            product("2", "TWITTER STATEMENT TEE", 55, "T-Shirts", TWITTER_LINE),
            product("11", "NHH SIGNATURE HOODIE", 145, "Hoodies", TWITTER_LINE),
            product("19", "TWITTER STATEMENT HOODIE", 145, "Hoodies", TWITTER_LINE),
            product(
                "20",
                "NHH SPECIAL EDITION CAP - LIMITED TIME ONLY",
                55,
                "Caps",
                "Exclusive limited edition design",
            ),
            product("13", "NHH SIGNATURE CAP - BLACK", 45, "Caps", "Bold statement piece"),
            product("14", "NHH SIGNATURE CAP - WHITE", 45, "Caps", "Clean minimalist style"),
            product("15", "NHH SIGNATURE BEANIE - BLACK", 40, "Beanies", TWITTER_LINE),
            product("16", "NHH SIGNATURE BEANIE - WHITE", 40, "Beanies", "Premium winter essential"),
            product("17", "NHH SIGNATURE HAT - WHITE", 45, "Hats", "Bold statement piece"),
            product("18", "TWITTER STATEMENT BEANIE", 40, "Hats", TWITTER_LINE),
            product("12", "NHH SIGNATURE CROP TOP", 65, "Womens Crop Tops", "Bold logo statement piece"),
        ];

        let categories = ["T-Shirts", "Hoodies", "Caps", "Hats", "Womens Crop Tops"]
            .into_iter()
            .map(String::from)
            .collect();

        Catalog::assemble(products, categories)
            .with_size_chart(SizeChart::new("T-Shirts", APPAREL_SIZES))
            .with_size_chart(SizeChart::new("Hoodies", APPAREL_SIZES))
            .with_size_chart(SizeChart::new("Womens Crop Tops", CROP_TOP_SIZES))
    }
}

fn product(id: &str, name: &str, price: i64, category: &str, description: &str) -> Product {
    Product::new(id, name, Money::base(price), category)
        .with_description(description)
        .with_image(format!("/products/{}.png", id))
}
