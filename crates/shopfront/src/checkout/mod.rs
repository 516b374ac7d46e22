//! Checkout module.
//!
//! Contains the checkout state machine, form data, order snapshots and
//! order processing.

mod address;
mod flow;
mod form;
mod order;
mod processor;

pub use address::ShippingAddress;
pub use flow::{CheckoutFlow, CheckoutStep};
pub use form::{CheckoutForm, ContactInfo, PaymentDetails, PaymentMethod};
pub use order::{Order, PaymentSummary};
pub use processor::{OrderProcessor, ProcessingSettings, SimulatedOutcome, SimulatedProcessor};
