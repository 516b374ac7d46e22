//! Order types.
//!
//! An order is a snapshot taken when the customer places it. The store
//! hands it to the processor and back to the caller; it is never kept.

use crate::cart::{Cart, CartTotals, LineItem};
use crate::checkout::{CheckoutForm, ContactInfo, PaymentMethod, ShippingAddress};
use crate::ids::OrderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payment data safe to keep on an order. Card number and CVV are dropped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentSummary {
    pub method: PaymentMethod,
    pub card_last4: String,
    pub name_on_card: String,
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Cart lines at the time of placing.
    pub lines: Vec<LineItem>,
    /// Customer contact details.
    pub contact: ContactInfo,
    /// Shipping address.
    pub shipping_address: ShippingAddress,
    /// Payment summary.
    pub payment: PaymentSummary,
    /// Totals at the time of placing.
    pub totals: CartTotals,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Snapshot a cart and checkout form into a new order.
    pub fn from_checkout(cart: &Cart, form: &CheckoutForm, totals: CartTotals) -> Self {
        Self {
            id: OrderId::generate(),
            lines: cart.items().to_vec(),
            contact: form.contact.clone(),
            shipping_address: form.shipping.clone(),
            payment: PaymentSummary {
                method: form.payment.method,
                card_last4: form.payment.card_last4(),
                name_on_card: form.payment.name_on_card.clone(),
            },
            totals,
            placed_at: Utc::now(),
        }
    }

    /// Get total item count.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}
