//! Cart, pricing and checkout logic for the Shopfront storefront.
//!
//! This crate provides the state a storefront session mutates:
//!
//! - **Cart**: line items keyed by product and variant, derived totals
//! - **Checkout**: the four-step checkout flow, order snapshots, processing
//! - **Navigation**: the current view and the unguarded session flags
//! - **Store**: [`Storefront`], which ties them together
//!
//! # Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use shopfront::prelude::*;
//!
//! let mut store = Storefront::new(StoreConfig::default())?;
//! let mouse = ProductRef::new(1, "Mouse", Decimal::new(2999, 2), "mouse.jpg");
//!
//! store.add_to_cart(&mouse, 1, None)?;
//! store.add_to_cart(&mouse, 2, None)?;
//!
//! let totals = store.totals()?;
//! assert_eq!(totals.subtotal.display(), "$89.97");
//! assert!(totals.is_free_shipping());
//! # Ok::<(), shopfront::CommerceError>(())
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod navigation;
pub mod store;

pub use error::CommerceError;
pub use ids::{OrderId, ProductId};
pub use money::{Currency, Money};
pub use store::Storefront;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::StoreConfig;
    pub use crate::error::CommerceError;
    pub use crate::ids::{OrderId, ProductId};
    pub use crate::money::{Currency, Money};
    pub use crate::store::Storefront;

    // Catalog
    pub use crate::catalog::ProductRef;

    // Cart
    pub use crate::cart::{Cart, CartTotals, LineItem, LineKey, PricingPolicy};

    // Checkout
    pub use crate::checkout::{
        CheckoutFlow, CheckoutForm, CheckoutStep, ContactInfo, Order, OrderProcessor,
        PaymentDetails, PaymentMethod, ProcessingSettings, ShippingAddress, SimulatedOutcome,
        SimulatedProcessor,
    };

    // Navigation
    pub use crate::navigation::{Navigator, SessionFlags, View};
}
