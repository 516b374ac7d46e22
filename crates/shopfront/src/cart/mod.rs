//! Shopping cart module.
//!
//! Contains the cart store, its line items and pricing.

mod cart;
mod pricing;

pub use cart::{Cart, LineItem, LineKey, MAX_QUANTITY_PER_ITEM};
pub use pricing::{CartTotals, PricingPolicy};
