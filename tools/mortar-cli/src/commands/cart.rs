//! Cart mutation and display commands.

use super::{AddArgs, RemoveArgs, SetArgs, ShowArgs};
use crate::context::Context;
use anyhow::Result;
use mortar_commerce::cart::{CartTotals, PromoCode};

/// Run the add command.
pub fn run_add(args: AddArgs, ctx: &Context) -> Result<()> {
    let product = ctx.storefront.product_by_sku(&args.sku)?;
    if !product.is_available() {
        ctx.output
            .warn(&format!("'{}' is not currently available", product.name));
    }

    let mut store = ctx.open_store()?;
    store.add(product.to_line_seed(), args.qty);

    let quantity = store
        .cart()
        .line(&product.id)
        .map(|l| l.quantity)
        .unwrap_or(0);
    ctx.output.success(&format!(
        "{} x{} in cart ({} items, {})",
        product.name,
        quantity,
        store.item_count(),
        store.subtotal().display()
    ));
    Ok(())
}

/// Run the set command.
pub fn run_set(args: SetArgs, ctx: &Context) -> Result<()> {
    let product = ctx.storefront.product_by_sku(&args.sku)?;
    let mut store = ctx.open_store()?;

    store.set_quantity(&product.id, args.qty);

    match store.cart().line(&product.id) {
        Some(line) => ctx.output.success(&format!(
            "{} quantity set to {}",
            line.name, line.quantity
        )),
        None => ctx
            .output
            .success(&format!("{} removed from cart", product.name)),
    }
    Ok(())
}

/// Run the remove command.
pub fn run_remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let product = ctx.storefront.product_by_sku(&args.sku)?;
    let mut store = ctx.open_store()?;

    if store.remove(&product.id) {
        ctx.output
            .success(&format!("{} removed from cart", product.name));
    } else {
        ctx.output
            .info(&format!("{} was not in the cart", product.name));
    }
    Ok(())
}

/// Run the clear command.
pub fn run_clear(ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    store.clear();
    ctx.output.success("Cart cleared");
    Ok(())
}

/// Run the show command.
pub fn run_show(args: ShowArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let cart = store.cart();

    let promo = resolve_promo(args.promo.as_deref(), ctx, &store)?;
    let policy = ctx.storefront.shipping_policy()?;
    let totals = CartTotals::price(cart, promo.as_ref(), &policy);

    if ctx.output.is_json() {
        #[derive(serde::Serialize)]
        struct ShowPayload<'a> {
            cart: &'a mortar_commerce::cart::Cart,
            totals: &'a CartTotals,
        }
        ctx.output.json(&ShowPayload {
            cart,
            totals: &totals,
        });
        return Ok(());
    }

    ctx.output.header("Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    for line in &cart.lines {
        ctx.output.kv(
            line.product_id.as_str(),
            &format!(
                "{} x{} @ {} = {}",
                line.name,
                line.quantity,
                line.unit_price.display(),
                line.total().display()
            ),
        );
    }

    ctx.output.kv("subtotal", &totals.subtotal.display());
    if totals.has_discount() {
        ctx.output
            .kv("discount", &format!("-{}", totals.discount.display()));
    }
    ctx.output.kv("shipping", &totals.shipping.display());
    ctx.output.kv("total", &totals.grand_total.display());
    Ok(())
}

/// Look up and validate a promo code against the current cart subtotal.
pub fn resolve_promo(
    code: Option<&str>,
    ctx: &Context,
    store: &mortar_store::CartStore<mortar_store::FileStorage>,
) -> Result<Option<PromoCode>> {
    let Some(code) = code else {
        return Ok(None);
    };

    let promos = ctx.storefront.promo_codes()?;
    let promo = PromoCode::find(&promos, code)?;
    promo.validate(&store.subtotal())?;
    Ok(Some(promo.clone()))
}
