//! Catalog listing command.

use super::CatalogArgs;
use crate::context::Context;
use anyhow::Result;

/// Run the catalog command.
pub fn run_catalog(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let mut products = ctx.storefront.products()?;
    if args.available {
        products.retain(|p| p.is_available());
    }

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("Catalog");
    if products.is_empty() {
        ctx.output.info("No products to show.");
        return Ok(());
    }

    for product in &products {
        let brand = product.brand.as_deref().unwrap_or("-");
        let stock = if product.in_stock() {
            format!("{} in stock", product.stock_quantity)
        } else {
            "out of stock".to_string()
        };
        ctx.output.kv(
            &product.sku,
            &format!(
                "{} ({}) {} [{}]",
                product.name,
                brand,
                product.unit_price.display(),
                stock
            ),
        );
    }

    Ok(())
}
