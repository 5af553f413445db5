//! Commerce error types.
//!
//! Cart mutations never fail (quantity violations are clamped, see the
//! cart module); errors here cover the parts of the flow the storefront
//! surfaces to the shopper as form errors: promo code validation and
//! order submission.

use crate::money::Money;
use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// No promo with this code exists.
    #[error("Unknown promo code: {0}")]
    UnknownPromoCode(String),

    /// Promo exists but has been deactivated.
    #[error("Promo code is not active: {0}")]
    PromoInactive(String),

    /// Promo validity window has not opened yet.
    #[error("Promo code is not yet valid: {0}")]
    PromoNotStarted(String),

    /// Promo validity window has closed.
    #[error("Promo code has expired: {0}")]
    PromoExpired(String),

    /// Promo has been redeemed its maximum number of times.
    #[error("Promo code usage limit reached: {0}")]
    PromoUsageLimitReached(String),

    /// Cart subtotal is below the promo's minimum.
    #[error("Cart subtotal {subtotal} is below the {required} minimum for this promo")]
    MinimumSubtotalNotMet { required: Money, subtotal: Money },

    /// Orders cannot be placed from an empty cart.
    #[error("Cannot place an order from an empty cart")]
    EmptyCart,

    /// Contact information failed validation.
    #[error("Invalid contact information: {0}")]
    InvalidContact(String),
}
