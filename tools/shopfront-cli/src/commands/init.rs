//! Write a default config file.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;

use super::InitArgs;
use crate::config::{generate_default_config, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the init command.
pub async fn run(args: InitArgs, ctx: &Context) -> Result<()> {
    let name = args.name.clone().unwrap_or_else(|| {
        ctx.cwd
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Shopfront")
            .to_string()
    });

    let path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);
    ctx.output.header(&format!("Initializing shop: {}", name));

    if path.exists() && !args.force {
        if ctx.output.is_json() {
            anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
        }
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", path.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            ctx.output.warn("Init cancelled");
            return Ok(());
        }
    }

    std::fs::write(&path, generate_default_config(&name))
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "config": path.display().to_string() }));
        return Ok(());
    }

    ctx.output.success(&format!("Wrote {}", path.display()));
    ctx.output.info("");
    ctx.output.info("Next steps:");
    ctx.output.list_item("shopfront catalog");
    ctx.output.list_item("shopfront order plan.toml");

    Ok(())
}
