//! Checkout form data.
//!
//! Required fields are checked for presence only: no email syntax check,
//! no card number checksum.

use crate::checkout::{CheckoutStep, ShippingAddress};
use serde::{Deserialize, Serialize};

/// Contact details collected on the first step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ContactInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Optional.
    pub phone: Option<String>,
}

impl ContactInfo {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
        ])
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
        }
    }
}

/// Card details collected on the payment step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PaymentDetails {
    pub method: PaymentMethod,
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
    pub name_on_card: String,
}

impl PaymentDetails {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("card_number", &self.card_number),
            ("expiry", &self.expiry),
            ("cvv", &self.cvv),
            ("name_on_card", &self.name_on_card),
        ])
    }

    /// Last four digits of the card number, ignoring spaces and dashes.
    pub fn card_last4(&self) -> String {
        let digits: Vec<char> = self
            .card_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        let start = digits.len().saturating_sub(4);
        digits[start..].iter().collect()
    }
}

/// Everything the checkout form collects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CheckoutForm {
    pub contact: ContactInfo,
    pub shipping: ShippingAddress,
    pub payment: PaymentDetails,
}

impl CheckoutForm {
    /// Blank required fields entered on one step.
    pub fn missing_fields_for(&self, step: CheckoutStep) -> Vec<&'static str> {
        match step {
            CheckoutStep::ContactInfo => self.contact.missing_fields(),
            CheckoutStep::Shipping => self.shipping.missing_fields(),
            CheckoutStep::Payment => self.payment.missing_fields(),
            CheckoutStep::Review | CheckoutStep::Completed => Vec::new(),
        }
    }

    /// All blank required fields, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        CheckoutStep::FORM_STEPS
            .iter()
            .flat_map(|step| self.missing_fields_for(*step))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

fn blank_fields(fields: &[(&'static str, &String)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}
