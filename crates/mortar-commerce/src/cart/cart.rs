//! Cart and line item types.
//!
//! The cart is the one piece of client state the storefront keeps: an
//! ordered list of lines, unique by product, with totals derived on demand.
//! Mutations never fail: quantity bound violations are clamped, not
//! rejected, because the UI constrains input with stepper controls and the
//! server re-validates stock at checkout.

use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Quantity ceiling applied when a line carries no stock ceiling of its own.
pub const DEFAULT_MAX_QUANTITY: i64 = 999;

/// Descriptor for a line before a quantity is chosen.
///
/// Built from a catalog product (see `Product::to_line_seed`); everything
/// except `product_id`, `unit_price`, and `max_quantity` is display
/// metadata the cart carries opaquely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineSeed {
    /// Product identity; the merge/lookup key.
    pub product_id: ProductId,
    /// Product name for display.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Unit price; negative values are treated as zero.
    pub unit_price: Money,
    /// Stock ceiling at the time of add. Non-positive values are ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_quantity: Option<i64>,
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product this line is for; unique within a cart.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Unit price.
    pub unit_price: Money,
    /// Selected quantity, always in `[1, ceiling]`.
    pub quantity: i64,
    /// Stock ceiling captured when the line was first added.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_quantity: Option<i64>,
}

impl CartLine {
    /// The effective quantity ceiling for this line.
    pub fn ceiling(&self) -> i64 {
        self.max_quantity.unwrap_or(DEFAULT_MAX_QUANTITY)
    }

    /// Line total (unit price times quantity).
    pub fn total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }

    /// Rebuild the seed this line was created from.
    pub fn seed(&self) -> LineSeed {
        LineSeed {
            product_id: self.product_id.clone(),
            name: self.name.clone(),
            brand: self.brand.clone(),
            image: self.image.clone(),
            slug: self.slug.clone(),
            unit_price: self.unit_price,
            max_quantity: self.max_quantity,
        }
    }
}

/// A shopping cart.
///
/// Holds an ordered list of lines, unique by product id. `subtotal` and
/// `item_count` are always derived from the lines, never stored, so they
/// cannot drift.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Lines in insertion order.
    pub lines: Vec<CartLine>,
    /// Cart currency. One currency per cart; line prices share it.
    pub currency: Currency,
}

impl Cart {
    /// Create a new empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    /// Rebuild a cart from a persisted line list.
    ///
    /// Lines are replayed through `add`, which re-establishes every
    /// invariant (one line per product, quantities clamped into range) even
    /// if the snapshot was edited or produced by an older version.
    pub fn from_lines(lines: Vec<CartLine>, currency: Currency) -> Self {
        let mut cart = Self::new(currency);
        for line in lines {
            cart.add(line.seed(), line.quantity);
        }
        cart
    }

    /// Add a product to the cart.
    ///
    /// A non-positive requested quantity is clamped to 1. If a line for the
    /// same product already exists its quantity becomes
    /// `min(existing + requested, ceiling)` and the existing line's metadata
    /// and ceiling are kept; otherwise a new line is appended with
    /// `min(requested, ceiling)`.
    pub fn add(&mut self, seed: LineSeed, quantity: i64) {
        let requested = quantity.max(1);

        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == seed.product_id)
        {
            existing.quantity = existing
                .quantity
                .saturating_add(requested)
                .min(existing.ceiling());
            return;
        }

        let max_quantity = seed.max_quantity.filter(|q| *q > 0);
        let ceiling = max_quantity.unwrap_or(DEFAULT_MAX_QUANTITY);
        self.lines.push(CartLine {
            product_id: seed.product_id,
            name: seed.name,
            brand: seed.brand,
            image: seed.image,
            slug: seed.slug,
            unit_price: seed.unit_price.or_zero(),
            quantity: requested.min(ceiling),
            max_quantity,
        });
    }

    /// Set the quantity of an existing line.
    ///
    /// A target of zero or less removes the line. Otherwise the quantity is
    /// clamped into `[1, ceiling]`. A missing product id is a no-op.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| &l.product_id == product_id) {
            line.quantity = quantity.min(line.ceiling());
        }
    }

    /// Remove the line for a product. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.product_id != product_id);
        self.lines.len() < len_before
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Fold another cart into this one with the same merge/clamp rules as
    /// `add` (e.g., a guest cart on login).
    pub fn merge(&mut self, other: Cart) {
        for line in other.lines {
            let quantity = line.quantity;
            self.add(line.seed(), quantity);
        }
    }

    /// Get the line for a product, if present.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    /// Sum of unit price times quantity across all lines.
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(self.currency), |acc, l| {
                acc.saturating_add(&l.total())
            })
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0_i64, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Number of distinct products.
    pub fn unique_line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}
