//! Promo code types.

use crate::error::CommerceError;
use crate::ids::PromoId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// What a promo code grants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PromoKind {
    /// Percentage off the cart subtotal (0.0 - 100.0).
    Percentage(f64),
    /// Fixed amount off, capped at the subtotal.
    Fixed(Money),
    /// Shipping is free regardless of the threshold.
    FreeShipping,
}

/// A promo code definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromoCode {
    /// Unique promo identifier.
    pub id: PromoId,
    /// Code as entered by the shopper (stored uppercase, matched
    /// case-insensitively).
    pub code: String,
    /// What the code grants.
    pub kind: PromoKind,
    /// Minimum cart subtotal for the code to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_subtotal: Option<Money>,
    /// Start of the validity window (unix seconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<i64>,
    /// End of the validity window (unix seconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<i64>,
    /// Maximum number of redemptions (None = unlimited).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<i64>,
    /// Redemptions so far.
    pub usage_count: i64,
    /// Whether the code is active.
    pub active: bool,
}

impl PromoCode {
    fn new(code: impl Into<String>, kind: PromoKind) -> Self {
        Self {
            id: PromoId::generate(),
            code: code.into().to_uppercase(),
            kind,
            min_subtotal: None,
            starts_at: None,
            ends_at: None,
            usage_limit: None,
            usage_count: 0,
            active: true,
        }
    }

    /// Create a percentage-off code.
    pub fn percentage(code: impl Into<String>, percent: f64) -> Self {
        Self::new(code, PromoKind::Percentage(percent.clamp(0.0, 100.0)))
    }

    /// Create a fixed-amount-off code.
    pub fn fixed(code: impl Into<String>, amount: Money) -> Self {
        Self::new(code, PromoKind::Fixed(amount))
    }

    /// Create a free-shipping code.
    pub fn free_shipping(code: impl Into<String>) -> Self {
        Self::new(code, PromoKind::FreeShipping)
    }

    /// Require a minimum cart subtotal.
    pub fn with_min_subtotal(mut self, amount: Money) -> Self {
        self.min_subtotal = Some(amount);
        self
    }

    /// Cap the number of redemptions.
    pub fn with_usage_limit(mut self, limit: i64) -> Self {
        self.usage_limit = Some(limit);
        self
    }

    /// Set the start of the validity window.
    pub fn starting_at(mut self, timestamp: i64) -> Self {
        self.starts_at = Some(timestamp);
        self
    }

    /// Set the end of the validity window.
    pub fn expiring_at(mut self, timestamp: i64) -> Self {
        self.ends_at = Some(timestamp);
        self
    }

    /// Record a redemption.
    pub fn record_usage(&mut self) {
        self.usage_count += 1;
    }

    /// Check whether this code can be applied to a cart with the given
    /// subtotal.
    pub fn validate(&self, subtotal: &Money) -> Result<(), CommerceError> {
        if !self.active {
            return Err(CommerceError::PromoInactive(self.code.clone()));
        }

        let now = current_timestamp();

        if let Some(starts) = self.starts_at {
            if now < starts {
                return Err(CommerceError::PromoNotStarted(self.code.clone()));
            }
        }

        if let Some(ends) = self.ends_at {
            if now > ends {
                return Err(CommerceError::PromoExpired(self.code.clone()));
            }
        }

        if let Some(limit) = self.usage_limit {
            if self.usage_count >= limit {
                return Err(CommerceError::PromoUsageLimitReached(self.code.clone()));
            }
        }

        if let Some(min) = self.min_subtotal {
            if subtotal.amount_cents < min.amount_cents {
                return Err(CommerceError::MinimumSubtotalNotMet {
                    required: min,
                    subtotal: *subtotal,
                });
            }
        }

        Ok(())
    }

    /// The merchandise discount this code grants on a subtotal.
    ///
    /// Percentage rounds to the nearest cent; fixed amounts are capped at
    /// the subtotal so totals never go negative; free shipping contributes
    /// no merchandise discount.
    pub fn discount_for(&self, subtotal: &Money) -> Money {
        match &self.kind {
            PromoKind::Percentage(percent) => subtotal.percentage(*percent),
            PromoKind::Fixed(amount) => amount.or_zero().min(subtotal),
            PromoKind::FreeShipping => Money::zero(subtotal.currency),
        }
    }

    /// Whether this code waives shipping.
    pub fn grants_free_shipping(&self) -> bool {
        matches!(self.kind, PromoKind::FreeShipping)
    }

    /// Look up a code case-insensitively.
    pub fn find<'a>(codes: &'a [PromoCode], code: &str) -> Result<&'a PromoCode, CommerceError> {
        let needle = code.trim().to_uppercase();
        codes
            .iter()
            .find(|p| p.code == needle)
            .ok_or(CommerceError::UnknownPromoCode(needle))
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
