//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use shopfront_commerce::catalog::{Catalog, CatalogConfig};
use shopfront_commerce::store::JsonlOrderStore;
use tracing::debug;

use crate::config::{ShopConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Shop configuration, with environment overrides applied.
    pub config: ShopConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, env: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            ShopConfig::load(path)?
        } else {
            Self::find_config(&cwd).unwrap_or_default()
        };
        let config = match env {
            Some(env) => config.for_environment(env),
            None => config,
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<ShopConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = ShopConfig::load(config_path.to_str()?) {
                        debug!(path = %config_path.display(), "loaded config");
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// The configured catalog, or the built-in one.
    pub fn catalog(&self) -> Result<Catalog> {
        let Some(source) = &self.config.catalog else {
            return Ok(Catalog::builtin());
        };

        let path = self.resolve_path(&source.path);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        let config: CatalogConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;
        Catalog::from_config(config)
            .with_context(|| format!("Invalid catalog file: {}", path.display()))
    }

    /// The JSON-lines order store.
    pub fn order_store(&self) -> JsonlOrderStore {
        JsonlOrderStore::new(self.resolve_path(&self.config.store.orders_path))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}
