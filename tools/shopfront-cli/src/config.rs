//! CLI configuration.

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shopfront_commerce::Currency;

/// Config file names searched from the working directory upwards.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["shopfront.toml", ".shopfront.toml", "shopfront.json"];

/// Shopfront configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShopConfig {
    /// Storefront settings.
    #[serde(default)]
    pub shop: ShopSection,

    /// Order store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Catalog file; the built-in catalog when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogSource>,

    /// Environment-specific overrides.
    #[serde(default)]
    pub environments: HashMap<String, EnvironmentConfig>,
}

impl ShopConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Get environment-specific config.
    pub fn for_environment(&self, env: &str) -> ShopConfig {
        let mut config = self.clone();

        if let Some(env_config) = self.environments.get(env) {
            if let Some(ref store) = env_config.store {
                config.store = store.clone();
            }
        }

        config
    }

    /// The display currency used when a command names none.
    pub fn default_currency(&self) -> Currency {
        Currency::resolve(&self.shop.default_currency)
    }
}

/// Storefront settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShopSection {
    /// Shop name shown in headers.
    #[serde(default = "default_shop_name")]
    pub name: String,

    /// Display currency code.
    #[serde(default = "default_currency_code")]
    pub default_currency: String,
}

fn default_shop_name() -> String {
    "Shopfront".to_string()
}

fn default_currency_code() -> String {
    Currency::BASE.code().to_string()
}

impl Default for ShopSection {
    fn default() -> Self {
        Self {
            name: default_shop_name(),
            default_currency: default_currency_code(),
        }
    }
}

/// Order store configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// JSON-lines file orders are appended to.
    #[serde(default = "default_orders_path")]
    pub orders_path: String,
}

fn default_orders_path() -> String {
    ".shopfront/orders.jsonl".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            orders_path: default_orders_path(),
        }
    }
}

/// Catalog file location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogSource {
    /// TOML catalog file.
    pub path: String,
}

/// Environment-specific configuration overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentConfig {
    /// Store config override.
    #[serde(default)]
    pub store: Option<StoreConfig>,
}

/// Generate a default shopfront.toml config file.
pub fn generate_default_config(name: &str) -> String {
    format!(
        r#"# Shopfront configuration

[shop]
name = "{name}"
# One of USD, EUR, GBP, JPY, CAD, AUD
default_currency = "USD"

[store]
orders_path = ".shopfront/orders.jsonl"

# Replace the built-in catalog with a TOML file
# [catalog]
# path = "catalog.toml"

[environments.test]
[environments.test.store]
orders_path = ".shopfront/test-orders.jsonl"
"#,
        name = name
    )
}
