//! Storefront configuration file.
//!
//! The CLI's catalog, promo codes, and shipping policy come from a single
//! TOML file; this module parses it and converts entries into domain
//! types. Product IDs default to the SKU so carts persisted between
//! invocations keep merging correctly.

use anyhow::{bail, Context, Result};
use mortar_commerce::prelude::*;
use serde::Deserialize;

/// Parsed storefront file.
#[derive(Debug, Clone, Deserialize)]
pub struct StorefrontConfig {
    /// Currency code (default USD).
    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub shipping: ShippingEntry,

    #[serde(default)]
    pub products: Vec<ProductEntry>,

    #[serde(default)]
    pub promos: Vec<PromoEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShippingEntry {
    /// Flat shipping rate in cents.
    #[serde(default = "default_flat_rate_cents")]
    pub flat_rate_cents: i64,
    /// Free-shipping threshold in cents; omit to always charge.
    pub free_threshold_cents: Option<i64>,
}

fn default_flat_rate_cents() -> i64 {
    1500
}

impl Default for ShippingEntry {
    fn default() -> Self {
        Self {
            flat_rate_cents: default_flat_rate_cents(),
            free_threshold_cents: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductEntry {
    pub sku: String,
    pub name: String,
    pub slug: String,
    /// Stable product id; defaults to the SKU.
    pub id: Option<String>,
    pub brand: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub price_cents: i64,
    #[serde(default)]
    pub stock: i64,
    /// "active" (default), "hidden", or "discontinued".
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromoEntry {
    pub code: String,
    /// "percentage", "fixed", or "free_shipping".
    pub kind: String,
    /// Percent off, for percentage promos.
    pub percent: Option<f64>,
    /// Amount off in cents, for fixed promos.
    pub amount_cents: Option<i64>,
    pub min_subtotal_cents: Option<i64>,
    /// Unix timestamp the code stops working.
    pub expires_at: Option<i64>,
}

impl StorefrontConfig {
    /// Load and parse the storefront file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read storefront file: {}", path))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse storefront file: {}", path))
    }

    /// The storefront currency.
    pub fn currency(&self) -> Result<Currency> {
        match &self.currency {
            None => Ok(Currency::default()),
            Some(code) => Currency::from_code(code)
                .with_context(|| format!("Unsupported currency code: {}", code)),
        }
    }

    /// Shipping policy for checkout pricing.
    pub fn shipping_policy(&self) -> Result<ShippingPolicy> {
        let currency = self.currency()?;
        let mut policy = ShippingPolicy::flat(Money::new(self.shipping.flat_rate_cents, currency));
        if let Some(threshold) = self.shipping.free_threshold_cents {
            policy = policy.with_free_threshold(Money::new(threshold, currency));
        }
        Ok(policy)
    }

    /// All catalog products as domain types.
    pub fn products(&self) -> Result<Vec<Product>> {
        let currency = self.currency()?;
        self.products
            .iter()
            .map(|entry| entry.to_product(currency))
            .collect()
    }

    /// Look up a product by SKU (case-insensitive).
    pub fn product_by_sku(&self, sku: &str) -> Result<Product> {
        let currency = self.currency()?;
        let needle = sku.trim().to_uppercase();
        let entry = self
            .products
            .iter()
            .find(|p| p.sku.to_uppercase() == needle);
        match entry {
            Some(entry) => entry.to_product(currency),
            None => bail!("No product with SKU '{}' in the catalog", sku),
        }
    }

    /// All promo codes as domain types.
    pub fn promo_codes(&self) -> Result<Vec<PromoCode>> {
        let currency = self.currency()?;
        self.promos
            .iter()
            .map(|entry| entry.to_promo(currency))
            .collect()
    }
}

impl ProductEntry {
    fn to_product(&self, currency: Currency) -> Result<Product> {
        let status = match &self.status {
            None => ProductStatus::Active,
            Some(s) => ProductStatus::from_str(s)
                .with_context(|| format!("Unknown product status: {}", s))?,
        };

        Ok(Product {
            id: ProductId::new(self.id.clone().unwrap_or_else(|| self.sku.clone())),
            sku: self.sku.clone(),
            name: self.name.clone(),
            slug: self.slug.clone(),
            brand: self.brand.clone(),
            image: self.image.clone(),
            description: self.description.clone(),
            unit_price: Money::new(self.price_cents, currency),
            stock_quantity: self.stock,
            status,
        })
    }
}

impl PromoEntry {
    fn to_promo(&self, currency: Currency) -> Result<PromoCode> {
        let mut promo = match self.kind.as_str() {
            "percentage" => {
                let percent = self
                    .percent
                    .with_context(|| format!("Promo '{}' is missing 'percent'", self.code))?;
                PromoCode::percentage(&self.code, percent)
            }
            "fixed" => {
                let cents = self
                    .amount_cents
                    .with_context(|| format!("Promo '{}' is missing 'amount_cents'", self.code))?;
                PromoCode::fixed(&self.code, Money::new(cents, currency))
            }
            "free_shipping" => PromoCode::free_shipping(&self.code),
            other => bail!("Unknown promo kind '{}' for code '{}'", other, self.code),
        };

        if let Some(min) = self.min_subtotal_cents {
            promo = promo.with_min_subtotal(Money::new(min, currency));
        }
        if let Some(ts) = self.expires_at {
            promo = promo.expiring_at(ts);
        }

        Ok(promo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
currency = "USD"

[shipping]
flat_rate_cents = 1500
free_threshold_cents = 50000

[[products]]
sku = "CEM-425"
name = "Portland Cement 42.5 25kg"
slug = "portland-cement-425"
brand = "HoldFast"
price_cents = 45000
stock = 150

[[products]]
sku = "BRK-001"
name = "Clay Brick"
slug = "clay-brick"
price_cents = 120
stock = 5000
status = "hidden"

[[promos]]
code = "SAVE10"
kind = "percentage"
percent = 10.0

[[promos]]
code = "BULK50"
kind = "fixed"
amount_cents = 5000
min_subtotal_cents = 100000
"#;

    #[test]
    fn test_parse_sample() {
        let config: StorefrontConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.products.len(), 2);
        assert_eq!(config.promos.len(), 2);
        assert_eq!(config.currency().unwrap(), Currency::USD);

        let policy = config.shipping_policy().unwrap();
        assert_eq!(policy.flat_rate.amount_cents, 1500);
        assert_eq!(policy.free_threshold.unwrap().amount_cents, 50000);
    }

    #[test]
    fn test_product_id_defaults_to_sku() {
        let config: StorefrontConfig = toml::from_str(SAMPLE).unwrap();
        let product = config.product_by_sku("cem-425").unwrap();
        assert_eq!(product.id.as_str(), "CEM-425");
        assert_eq!(product.stock_quantity, 150);
    }

    #[test]
    fn test_hidden_status_parsed() {
        let config: StorefrontConfig = toml::from_str(SAMPLE).unwrap();
        let product = config.product_by_sku("BRK-001").unwrap();
        assert_eq!(product.status, ProductStatus::Hidden);
        assert!(!product.is_available());
    }

    #[test]
    fn test_unknown_sku_errors() {
        let config: StorefrontConfig = toml::from_str(SAMPLE).unwrap();
        assert!(config.product_by_sku("NOPE").is_err());
    }

    #[test]
    fn test_promos_converted() {
        let config: StorefrontConfig = toml::from_str(SAMPLE).unwrap();
        let promos = config.promo_codes().unwrap();

        let bulk = PromoCode::find(&promos, "BULK50").unwrap();
        assert_eq!(bulk.min_subtotal.unwrap().amount_cents, 100000);
        assert!(matches!(bulk.kind, PromoKind::Fixed(_)));
    }

    #[test]
    fn test_unknown_promo_kind_errors() {
        let bad = r#"
[[promos]]
code = "X"
kind = "mystery"
"#;
        let config: StorefrontConfig = toml::from_str(bad).unwrap();
        assert!(config.promo_codes().is_err());
    }
}
