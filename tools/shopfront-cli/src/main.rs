//! Shopfront CLI - drive a storefront session from the command line.
//!
//! Commands:
//! - `shopfront catalog` - List the catalog grouped by category
//! - `shopfront price` - Convert and format a base-currency amount
//! - `shopfront order` - Place an order from an order plan file
//! - `shopfront orders` - List stored orders
//! - `shopfront plan` - Show the price book or a subscription's plan
//! - `shopfront init` - Write a default shopfront.toml

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{CatalogArgs, InitArgs, OrderArgs, OrdersArgs, PlanArgs, PriceArgs};

/// Shopfront - browse the catalog and place orders
#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Environment whose overrides apply
    #[arg(short, long, global = true)]
    env: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog grouped by category
    Catalog(CatalogArgs),

    /// Convert and format a base-currency amount
    Price(PriceArgs),

    /// Place an order from an order plan
    Order(OrderArgs),

    /// List stored orders
    Orders(OrdersArgs),

    /// Show the price book or a subscription's plan
    Plan(PlanArgs),

    /// Write a default config file
    Init(InitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = context::Context::load(cli.config.as_deref(), cli.env.as_deref(), output)?;

    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Price(args) => commands::price::run(args, &ctx).await,
        Commands::Order(args) => commands::order::run(args, &ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &ctx).await,
        Commands::Plan(args) => commands::plan::run(args, &ctx).await,
        Commands::Init(args) => commands::init::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the level.
fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose {
        "shopfront_commerce=debug,shopfront_cli=debug"
    } else {
        "warn"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into());

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
