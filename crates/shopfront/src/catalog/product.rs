//! Product references supplied by the catalog.

use crate::error::CommerceError;
use crate::ids::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The product fields the cart snapshots when an item is added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRef {
    /// Catalog product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in the cart's currency.
    pub price: Decimal,
    /// Opaque image reference (URL or asset key).
    #[serde(default)]
    pub image: String,
}

impl ProductRef {
    /// Create a new product reference.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        price: Decimal,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            price,
            image: image.into(),
        }
    }

    /// Reject references the cart cannot snapshot.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.name.trim().is_empty() {
            return Err(CommerceError::Validation(format!(
                "product {} has no name",
                self.id
            )));
        }
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(CommerceError::InvalidPrice(self.price.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_product() {
        let product = ProductRef::new(1, "Wireless Mouse", Decimal::new(2999, 2), "mouse.jpg");
        assert!(product.validate().is_ok());

        let free = ProductRef::new(2, "Sticker", Decimal::ZERO, "");
        assert!(free.validate().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let product = ProductRef::new(1, "Broken", Decimal::new(-1, 2), "");
        assert_eq!(
            product.validate(),
            Err(CommerceError::InvalidPrice("-0.01".to_string()))
        );
    }

    #[test]
    fn test_blank_name_rejected() {
        let product = ProductRef::new(1, "   ", Decimal::ONE, "");
        assert!(matches!(product.validate(), Err(CommerceError::Validation(_))));
    }

    #[test]
    fn test_deserialize_from_catalog_json() {
        let product: ProductRef =
            serde_json::from_str(r#"{"id": 1, "name": "Mouse", "price": "29.99"}"#).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Decimal::new(2999, 2));
        assert!(product.image.is_empty());
    }
}
