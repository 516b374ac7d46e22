//! Store configuration.

use crate::cart::PricingPolicy;
use crate::checkout::ProcessingSettings;
use crate::error::CommerceError;
use crate::money::Currency;
use serde::{Deserialize, Serialize};

/// Settings for a [`Storefront`](crate::store::Storefront).
///
/// Every section is optional in config files; missing values fall back to
/// the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Currency of the cart.
    pub currency: Currency,
    /// Shipping and tax rules.
    pub pricing: PricingPolicy,
    /// Order processing timing.
    pub checkout: ProcessingSettings,
}

impl StoreConfig {
    /// Check every section.
    pub fn validate(&self) -> Result<(), CommerceError> {
        self.pricing.validate()?;
        self.checkout.validate()
    }
}
