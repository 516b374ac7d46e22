//! Address types.

use serde::{Deserialize, Serialize};

/// A domestic shipping address as collected at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ShippingAddress {
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State code (e.g., "CA").
    pub state: String,
    /// ZIP code.
    pub zip: String,
}

impl ShippingAddress {
    /// Create a new address.
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            city: city.into(),
            state: state.into(),
            zip: zip.into(),
        }
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        format!("{}, {}, {} {}", self.address, self.city, self.state, self.zip)
    }

    /// Names of blank fields.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let fields = [
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zip", &self.zip),
        ];
        fields
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// Check if address is complete.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
