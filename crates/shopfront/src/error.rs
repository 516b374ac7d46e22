//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart and checkout operations.
///
/// Validation failures are raised before any state is touched, so an
/// operation that returns an error leaves the cart and checkout unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// A required field is missing or malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Negative unit price.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// No line matches the given product and variant.
    #[error("Item not in cart: {0}")]
    LineNotFound(String),

    /// The cart has no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// A checkout operation was attempted with no active checkout.
    #[error("Checkout has not been started")]
    CheckoutNotStarted,

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Checkout incomplete.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// The order processor declined the order.
    #[error("Payment declined: {0}")]
    PaymentDeclined(String),

    /// Order processing did not finish in time.
    #[error("Order processing timed out after {0}ms")]
    ProcessingTimeout(u64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}

impl CommerceError {
    /// Whether this error was caused by bad caller input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CommerceError::Validation(_)
                | CommerceError::InvalidQuantity(_)
                | CommerceError::InvalidPrice(_)
                | CommerceError::QuantityExceedsLimit(..)
                | CommerceError::CheckoutIncomplete(_)
        )
    }

    /// Whether this error reports a missing cart line.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CommerceError::LineNotFound(_))
    }
}
