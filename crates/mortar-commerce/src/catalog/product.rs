//! Product records.

use crate::cart::LineSeed;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Product visibility status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProductStatus {
    /// Visible and purchasable.
    #[default]
    Active,
    /// Temporarily hidden from the storefront.
    Hidden,
    /// Permanently retired; kept for order history.
    Discontinued,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Hidden => "hidden",
            ProductStatus::Discontinued => "discontinued",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(ProductStatus::Active),
            "hidden" => Some(ProductStatus::Hidden),
            "discontinued" => Some(ProductStatus::Discontinued),
            _ => None,
        }
    }
}

/// A product in the catalog.
///
/// Carries exactly what the storefront needs to list a product and to seed
/// a cart line: identity, display metadata, price, and the stock level that
/// becomes the line's quantity ceiling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Stock keeping unit (unique).
    pub sku: String,
    /// Product name.
    pub name: String,
    /// URL-friendly slug.
    pub slug: String,
    /// Manufacturer or brand name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Primary image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Full description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unit price.
    pub unit_price: Money,
    /// Units currently in stock.
    pub stock_quantity: i64,
    /// Visibility status.
    pub status: ProductStatus,
}

impl Product {
    /// Create a new active product.
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        slug: impl Into<String>,
        unit_price: Money,
    ) -> Self {
        Self {
            id: ProductId::generate(),
            sku: sku.into(),
            name: name.into(),
            slug: slug.into(),
            brand: None,
            image: None,
            description: None,
            unit_price,
            stock_quantity: 0,
            status: ProductStatus::Active,
        }
    }

    /// Set the stock level.
    pub fn with_stock(mut self, quantity: i64) -> Self {
        self.stock_quantity = quantity;
        self
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Set the primary image URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Check if the product can be purchased right now.
    pub fn is_available(&self) -> bool {
        self.status == ProductStatus::Active && self.in_stock()
    }

    /// Build the seed for a cart line from this product.
    ///
    /// The current stock level is captured as the line's quantity ceiling;
    /// the cart does not re-check stock afterwards. A non-positive stock
    /// level yields no ceiling and the cart's default applies.
    pub fn to_line_seed(&self) -> LineSeed {
        LineSeed {
            product_id: self.id.clone(),
            name: self.name.clone(),
            brand: self.brand.clone(),
            image: self.image.clone(),
            slug: Some(self.slug.clone()),
            unit_price: self.unit_price,
            max_quantity: (self.stock_quantity > 0).then_some(self.stock_quantity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_product_availability() {
        let product = Product::new(
            "CEM-425",
            "Portland Cement 42.5 25kg",
            "portland-cement-425",
            Money::new(45000, Currency::USD),
        );
        assert!(!product.is_available()); // no stock yet

        let product = product.with_stock(150);
        assert!(product.is_available());
    }

    #[test]
    fn test_hidden_product_unavailable() {
        let mut product = Product::new(
            "BRK-001",
            "Clay Brick",
            "clay-brick",
            Money::new(120, Currency::USD),
        )
        .with_stock(5000);
        product.status = ProductStatus::Hidden;
        assert!(!product.is_available());
    }

    #[test]
    fn test_line_seed_captures_stock_ceiling() {
        let product = Product::new(
            "CEM-425",
            "Portland Cement 42.5 25kg",
            "portland-cement-425",
            Money::new(45000, Currency::USD),
        )
        .with_stock(150)
        .with_brand("HoldFast");

        let seed = product.to_line_seed();
        assert_eq!(seed.product_id, product.id);
        assert_eq!(seed.max_quantity, Some(150));
        assert_eq!(seed.brand.as_deref(), Some("HoldFast"));
        assert_eq!(seed.slug.as_deref(), Some("portland-cement-425"));
    }

    #[test]
    fn test_line_seed_no_ceiling_without_stock() {
        let product = Product::new(
            "SND-010",
            "Washed Sand 50kg",
            "washed-sand-50",
            Money::new(8900, Currency::USD),
        );
        assert_eq!(product.to_line_seed().max_quantity, None);
    }
}
