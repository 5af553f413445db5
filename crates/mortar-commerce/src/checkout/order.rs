//! Order types.
//!
//! An order is the payload submitted when the shopper checks out: a
//! denormalized copy of the cart lines plus contact information and the
//! priced totals. After a successful submission the caller clears the cart.

use crate::cart::{Cart, CartTotals};
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order placed, awaiting confirmation.
    #[default]
    Pending,
    /// Order confirmed and being prepared.
    Confirmed,
    /// Order handed to the carrier.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Check if the order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Check if the order can still be cancelled.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }
}

/// Contact and delivery details collected at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub address: String,
}

impl ContactInfo {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
            address: address.into(),
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Validate the fields the storefront requires.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.name.trim().is_empty() {
            return Err(CommerceError::InvalidContact("name is required".into()));
        }
        if self.address.trim().is_empty() {
            return Err(CommerceError::InvalidContact("address is required".into()));
        }

        let email = self.email.trim();
        let valid_email = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
            }
            None => false,
        };
        if !valid_email {
            return Err(CommerceError::InvalidContact(format!(
                "invalid email address: {}",
                email
            )));
        }

        Ok(())
    }
}

/// A line on a placed order, copied from the cart at submission time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub total: Money,
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Current status.
    pub status: OrderStatus,
    /// Who placed the order and where it ships.
    pub contact: ContactInfo,
    /// Lines copied from the cart.
    pub lines: Vec<OrderLine>,
    /// Priced totals at submission time.
    pub totals: CartTotals,
    /// Promo code applied, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
    /// Unix timestamp of placement.
    pub created_at: i64,
}

impl Order {
    /// Build an order from a cart.
    ///
    /// Fails on an empty cart or invalid contact info. The cart is not
    /// consumed or cleared here; the caller clears it once submission
    /// succeeds.
    pub fn from_cart(
        cart: &Cart,
        contact: ContactInfo,
        totals: CartTotals,
        promo_code: Option<String>,
    ) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        contact.validate()?;

        let lines = cart
            .lines
            .iter()
            .map(|l| OrderLine {
                product_id: l.product_id.clone(),
                name: l.name.clone(),
                unit_price: l.unit_price,
                quantity: l.quantity,
                total: l.total(),
            })
            .collect();

        Ok(Self {
            id: OrderId::generate(),
            status: OrderStatus::Pending,
            contact,
            lines,
            totals,
            promo_code,
            created_at: current_timestamp(),
        })
    }

    /// Total number of units on the order.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{LineSeed, ShippingPolicy};
    use crate::money::Currency;

    fn contact() -> ContactInfo {
        ContactInfo::new("Dana Mason", "dana@example.com", "12 Kiln Road")
    }

    fn full_cart() -> Cart {
        let mut cart = Cart::new(Currency::USD);
        cart.add(
            LineSeed {
                product_id: ProductId::new("p1"),
                name: "Portland Cement 42.5 25kg".to_string(),
                brand: None,
                image: None,
                slug: None,
                unit_price: Money::new(45000, Currency::USD),
                max_quantity: Some(150),
            },
            2,
        );
        cart
    }

    fn totals_for(cart: &Cart) -> CartTotals {
        CartTotals::price(
            cart,
            None,
            &ShippingPolicy::flat(Money::new(1500, Currency::USD)),
        )
    }

    #[test]
    fn test_order_from_cart_copies_lines() {
        let cart = full_cart();
        let totals = totals_for(&cart);
        let order = Order::from_cart(&cart, contact(), totals.clone(), None).unwrap();

        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.lines[0].quantity, 2);
        assert_eq!(order.lines[0].total.amount_cents, 90000);
        assert_eq!(order.totals, totals);
        assert_eq!(order.item_count(), 2);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_order_from_empty_cart_fails() {
        let cart = Cart::new(Currency::USD);
        let totals = totals_for(&cart);
        let result = Order::from_cart(&cart, contact(), totals, None);
        assert!(matches!(result, Err(CommerceError::EmptyCart)));
    }

    #[test]
    fn test_order_requires_valid_email() {
        let cart = full_cart();
        let totals = totals_for(&cart);
        let bad = ContactInfo::new("Dana Mason", "not-an-email", "12 Kiln Road");
        let result = Order::from_cart(&cart, bad, totals, None);
        assert!(matches!(result, Err(CommerceError::InvalidContact(_))));
    }

    #[test]
    fn test_order_requires_name_and_address() {
        let cart = full_cart();

        let no_name = ContactInfo::new("  ", "dana@example.com", "12 Kiln Road");
        assert!(Order::from_cart(&cart, no_name, totals_for(&cart), None).is_err());

        let no_address = ContactInfo::new("Dana Mason", "dana@example.com", "");
        assert!(Order::from_cart(&cart, no_address, totals_for(&cart), None).is_err());
    }

    #[test]
    fn test_status_predicates() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(OrderStatus::Confirmed.can_cancel());
        assert!(!OrderStatus::Shipped.can_cancel());
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
    }
}
