//! Cart pricing: discount and shipping arithmetic.

use crate::cart::{Cart, PromoCode};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// How shipping is charged for an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingPolicy {
    /// Flat shipping rate.
    pub flat_rate: Money,
    /// Merchandise total (after discount) at which shipping becomes free.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_threshold: Option<Money>,
}

impl ShippingPolicy {
    /// Flat-rate shipping with no free threshold.
    pub fn flat(rate: Money) -> Self {
        Self {
            flat_rate: rate,
            free_threshold: None,
        }
    }

    /// Add a free-shipping threshold.
    pub fn with_free_threshold(mut self, threshold: Money) -> Self {
        self.free_threshold = Some(threshold);
        self
    }

    fn rate_for(&self, merchandise_total: &Money, free_via_promo: bool) -> Money {
        if free_via_promo {
            return Money::zero(merchandise_total.currency);
        }
        if let Some(threshold) = self.free_threshold {
            if merchandise_total.amount_cents >= threshold.amount_cents {
                return Money::zero(merchandise_total.currency);
            }
        }
        self.flat_rate
    }
}

/// Complete pricing breakdown for a cart at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of line totals before discounts.
    pub subtotal: Money,
    /// Merchandise discount from the applied promo.
    pub discount: Money,
    /// Shipping charge.
    pub shipping: Money,
    /// subtotal - discount + shipping.
    pub grand_total: Money,
}

impl CartTotals {
    /// Price a cart under a shipping policy, with an optional promo.
    ///
    /// The promo is assumed to have been validated already; pricing itself
    /// cannot fail. An empty cart prices to all zeros and ships for
    /// nothing.
    pub fn price(cart: &Cart, promo: Option<&PromoCode>, policy: &ShippingPolicy) -> Self {
        let subtotal = cart.subtotal();
        let discount = promo
            .map(|p| p.discount_for(&subtotal))
            .unwrap_or_else(|| Money::zero(cart.currency));

        let merchandise_total = subtotal.saturating_sub(&discount).or_zero();

        let shipping = if cart.is_empty() {
            Money::zero(cart.currency)
        } else {
            let free_via_promo = promo.map(|p| p.grants_free_shipping()).unwrap_or(false);
            policy.rate_for(&merchandise_total, free_via_promo)
        };

        Self {
            subtotal,
            discount,
            shipping,
            grand_total: merchandise_total.saturating_add(&shipping),
        }
    }

    /// Check if any discount is applied.
    pub fn has_discount(&self) -> bool {
        self.discount.is_positive()
    }
}
