//! Checkout command.

use super::cart::resolve_promo;
use super::CheckoutArgs;
use crate::context::Context;
use anyhow::{bail, Result};
use mortar_commerce::cart::CartTotals;
use mortar_commerce::checkout::{ContactInfo, Order};

/// Run the checkout command.
///
/// Builds the order from the persisted cart, prints the summary, and
/// clears the cart once the order is placed.
pub fn run_checkout(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    if store.is_empty() {
        bail!("Cart is empty; add something before checking out");
    }

    let promo = resolve_promo(args.promo.as_deref(), ctx, &store)?;
    let policy = ctx.storefront.shipping_policy()?;
    let totals = CartTotals::price(store.cart(), promo.as_ref(), &policy);

    let mut contact = ContactInfo::new(&args.name, &args.email, &args.address);
    if let Some(phone) = &args.phone {
        contact = contact.with_phone(phone);
    }

    let order = Order::from_cart(
        store.cart(),
        contact,
        totals,
        promo.as_ref().map(|p| p.code.clone()),
    )?;

    // The cart's lifecycle ends on successful submission.
    store.clear();

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    ctx.output.header(&format!("Order {}", order.id));
    for line in &order.lines {
        ctx.output.kv(
            line.product_id.as_str(),
            &format!(
                "{} x{} = {}",
                line.name,
                line.quantity,
                line.total.display()
            ),
        );
    }
    ctx.output.kv("subtotal", &order.totals.subtotal.display());
    if order.totals.has_discount() {
        let code = order.promo_code.as_deref().unwrap_or("promo");
        ctx.output.kv(
            code,
            &format!("-{}", order.totals.discount.display()),
        );
    }
    ctx.output.kv("shipping", &order.totals.shipping.display());
    ctx.output.kv("total", &order.totals.grand_total.display());
    ctx.output
        .success(&format!("Order placed for {}", order.contact.name));
    Ok(())
}
