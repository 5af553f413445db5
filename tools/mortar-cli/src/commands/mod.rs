//! CLI command implementations.

mod cart;
mod catalog;
mod checkout;

pub use cart::{run_add, run_clear, run_remove, run_set, run_show};
pub use catalog::run_catalog;
pub use checkout::run_checkout;

use clap::Args;

#[derive(Args)]
pub struct CatalogArgs {
    /// Only list products that are active and in stock
    #[arg(long)]
    pub available: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Product SKU from the catalog
    pub sku: String,

    /// Quantity to add
    #[arg(long, default_value_t = 1)]
    pub qty: i64,
}

#[derive(Args)]
pub struct SetArgs {
    /// Product SKU from the catalog
    pub sku: String,

    /// Target quantity; 0 removes the line
    #[arg(long)]
    pub qty: i64,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Product SKU from the catalog
    pub sku: String,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Preview totals with a promo code applied
    #[arg(long)]
    pub promo: Option<String>,
}

#[derive(Args)]
pub struct CheckoutArgs {
    /// Full name for the order
    #[arg(long)]
    pub name: String,

    /// Contact email
    #[arg(long)]
    pub email: String,

    /// Contact phone
    #[arg(long)]
    pub phone: Option<String>,

    /// Delivery address
    #[arg(long)]
    pub address: String,

    /// Promo code to apply
    #[arg(long)]
    pub promo: Option<String>,
}
