//! Commerce domain types and cart logic for Mortar.
//!
//! This crate provides the domain layer for a building-materials
//! storefront:
//!
//! - **Catalog**: products with price, brand, and stock level
//! - **Cart**: line items with merge-on-add and silent quantity clamping
//! - **Promos**: percentage / fixed / free-shipping codes with validation
//! - **Pricing**: discount and shipping arithmetic, free-shipping threshold
//! - **Checkout**: the order payload built at submission time
//!
//! # Example
//!
//! ```
//! use mortar_commerce::prelude::*;
//!
//! let product = Product::new(
//!     "CEM-425",
//!     "Portland Cement 42.5 25kg",
//!     "portland-cement-425",
//!     Money::new(45000, Currency::USD),
//! )
//! .with_stock(150);
//!
//! let mut cart = Cart::new(Currency::USD);
//! cart.add(product.to_line_seed(), 2);
//! assert_eq!(cart.subtotal().amount_cents, 90000);
//!
//! let policy = ShippingPolicy::flat(Money::new(1500, Currency::USD))
//!     .with_free_threshold(Money::new(50000, Currency::USD));
//! let totals = CartTotals::price(&cart, None, &policy);
//! assert_eq!(totals.shipping.amount_cents, 0); // over the threshold
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Product, ProductStatus};

    // Cart
    pub use crate::cart::{
        Cart, CartLine, CartTotals, LineSeed, PromoCode, PromoKind, ShippingPolicy,
        DEFAULT_MAX_QUANTITY,
    };

    // Checkout
    pub use crate::checkout::{ContactInfo, Order, OrderLine, OrderStatus};
}
