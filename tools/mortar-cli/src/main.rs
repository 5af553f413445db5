//! Mortar CLI - terminal storefront for the Mortar cart toolkit.
//!
//! Commands:
//! - `mortar catalog` - List products from the storefront file
//! - `mortar add` - Add a product to the cart
//! - `mortar set` - Change a line's quantity
//! - `mortar remove` - Remove a line
//! - `mortar clear` - Empty the cart
//! - `mortar show` - Show cart lines and totals
//! - `mortar checkout` - Place an order and clear the cart
//!
//! The cart persists between invocations as a JSON snapshot in the state
//! directory.

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{AddArgs, CatalogArgs, CheckoutArgs, RemoveArgs, SetArgs, ShowArgs};
use config::StorefrontConfig;
use context::Context;
use output::Output;

/// Mortar CLI - browse the catalog, manage a cart, place orders
#[derive(Parser)]
#[command(name = "mortar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Storefront file path
    #[arg(long, global = true, default_value = "storefront.toml")]
    catalog: String,

    /// Directory the cart snapshot lives in
    #[arg(long, global = true, default_value = ".mortar")]
    state_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products from the storefront file
    Catalog(CatalogArgs),

    /// Add a product to the cart
    Add(AddArgs),

    /// Change a line's quantity (0 removes it)
    Set(SetArgs),

    /// Remove a line from the cart
    Remove(RemoveArgs),

    /// Empty the cart
    Clear,

    /// Show cart lines and totals
    Show(ShowArgs),

    /// Place an order and clear the cart
    Checkout(CheckoutArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = Output::new(cli.verbose, cli.json);
    output.debug(&format!("storefront file: {}", cli.catalog));

    let storefront = match StorefrontConfig::load(&cli.catalog) {
        Ok(config) => config,
        Err(err) => {
            output.error(&format!("{:#}", err));
            std::process::exit(1);
        }
    };

    let ctx = Context::new(output, storefront, cli.state_dir);

    let result = match cli.command {
        Commands::Catalog(args) => commands::run_catalog(args, &ctx),
        Commands::Add(args) => commands::run_add(args, &ctx),
        Commands::Set(args) => commands::run_set(args, &ctx),
        Commands::Remove(args) => commands::run_remove(args, &ctx),
        Commands::Clear => commands::run_clear(&ctx),
        Commands::Show(args) => commands::run_show(args, &ctx),
        Commands::Checkout(args) => commands::run_checkout(args, &ctx),
    };

    if let Err(err) = result {
        ctx.output.error(&format!("{:#}", err));
        std::process::exit(1);
    }

    Ok(())
}
