//! Cart pricing calculations.

use crate::cart::Cart;
use crate::error::CommerceError;
use crate::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shipping and tax rules applied to a cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Decimal,
    /// Fee charged at or below the threshold.
    pub flat_shipping_fee: Decimal,
    /// Tax rate applied to the subtotal (0.08 = 8%).
    pub tax_rate: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::new(3500, 2),
            flat_shipping_fee: Decimal::new(599, 2),
            tax_rate: Decimal::new(8, 2),
        }
    }
}

impl PricingPolicy {
    /// Check that no rate or fee is negative.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let fields = [
            ("free_shipping_threshold", self.free_shipping_threshold),
            ("flat_shipping_fee", self.flat_shipping_fee),
            ("tax_rate", self.tax_rate),
        ];
        for (name, value) in fields {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(CommerceError::Validation(format!(
                    "{} must not be negative (got {})",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Shipping fee for a subtotal.
    pub fn shipping_fee(&self, subtotal: &Money) -> Money {
        if subtotal.amount > self.free_shipping_threshold {
            Money::zero(subtotal.currency)
        } else {
            Money::new(self.flat_shipping_fee, subtotal.currency)
        }
    }

    /// Compute the derived totals of a cart.
    pub fn quote(&self, cart: &Cart) -> Result<CartTotals, CommerceError> {
        let subtotal = cart.subtotal()?;
        let shipping_fee = self.shipping_fee(&subtotal);
        let tax = subtotal.try_scale(self.tax_rate)?;
        let total = subtotal.try_add(&shipping_fee)?.try_add(&tax)?;

        let remaining_for_free_shipping = if shipping_fee.is_zero() {
            None
        } else {
            let threshold = Money::new(self.free_shipping_threshold, subtotal.currency);
            Some(threshold.try_subtract(&subtotal)?)
        };

        Ok(CartTotals {
            subtotal,
            shipping_fee,
            tax,
            total,
            item_count: cart.item_count(),
            remaining_for_free_shipping,
        })
    }
}

/// Derived amounts for a cart. Never stored on the cart itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of unit price times quantity.
    pub subtotal: Money,
    /// Shipping cost.
    pub shipping_fee: Money,
    /// Tax amount, unrounded.
    pub tax: Money,
    /// subtotal + shipping_fee + tax.
    pub total: Money,
    /// Sum of line quantities.
    pub item_count: i64,
    /// How much more the subtotal needs before shipping is free.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_for_free_shipping: Option<Money>,
}

impl CartTotals {
    pub fn is_free_shipping(&self) -> bool {
        self.shipping_fee.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductRef;
    use crate::ids::ProductId;
    use crate::money::Currency;

    fn cart_with(price_cents: i64, quantity: i64) -> Cart {
        let mut cart = Cart::default();
        let product = ProductRef::new(1, "Item", Decimal::new(price_cents, 2), "");
        cart.add_item(&product, quantity, None).unwrap();
        cart
    }

    #[test]
    fn test_mouse_scenario() {
        let mut cart = Cart::default();
        let mouse = ProductRef::new(1, "Mouse", Decimal::new(2999, 2), "");
        cart.add_item(&mouse, 1, None).unwrap();
        cart.add_item(&mouse, 2, None).unwrap();

        let totals = cart.totals().unwrap();
        assert_eq!(cart.line(ProductId::new(1), None).unwrap().quantity, 3);
        assert_eq!(totals.subtotal.amount, Decimal::new(8997, 2));
        assert!(totals.is_free_shipping());
        assert_eq!(totals.tax.amount, Decimal::new(71976, 4));
        assert_eq!(totals.total.amount, Decimal::new(971676, 4));
        assert_eq!(totals.remaining_for_free_shipping, None);
    }

    #[test]
    fn test_shipping_threshold_is_exclusive() {
        let at = cart_with(3500, 1).totals().unwrap();
        assert_eq!(at.shipping_fee.amount, Decimal::new(599, 2));
        assert_eq!(
            at.remaining_for_free_shipping,
            Some(Money::zero(Currency::USD))
        );

        let above = cart_with(3501, 1).totals().unwrap();
        assert!(above.is_free_shipping());
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        for (price, quantity) in [(1, 1), (999, 3), (3499, 1), (12345, 7), (0, 2)] {
            let totals = cart_with(price, quantity).totals().unwrap();
            let expected = totals
                .subtotal
                .try_add(&totals.shipping_fee)
                .unwrap()
                .try_add(&totals.tax)
                .unwrap();
            assert_eq!(totals.total, expected);
        }
    }

    #[test]
    fn test_empty_cart_totals() {
        let totals = Cart::default().totals().unwrap();
        assert!(totals.subtotal.is_zero());
        assert!(totals.tax.is_zero());
        assert_eq!(totals.shipping_fee.amount, Decimal::new(599, 2));
        assert_eq!(totals.item_count, 0);
    }

    #[test]
    fn test_custom_policy() {
        let policy = PricingPolicy {
            free_shipping_threshold: Decimal::new(100, 0),
            flat_shipping_fee: Decimal::new(10, 0),
            tax_rate: Decimal::ZERO,
        };
        let totals = policy.quote(&cart_with(5000, 1)).unwrap();
        assert_eq!(totals.shipping_fee.amount, Decimal::new(10, 0));
        assert_eq!(totals.total.amount, Decimal::new(60, 0));
        assert_eq!(
            totals.remaining_for_free_shipping.unwrap().amount,
            Decimal::new(50, 0)
        );
    }

    #[test]
    fn test_negative_policy_rejected() {
        let policy = PricingPolicy {
            tax_rate: Decimal::new(-1, 2),
            ..PricingPolicy::default()
        };
        assert!(matches!(policy.validate(), Err(CommerceError::Validation(_))));
        assert!(PricingPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_totals_recomputed_after_mutation() {
        let mut cart = cart_with(1000, 1);
        assert_eq!(cart.totals().unwrap().subtotal.amount, Decimal::new(10, 0));
        cart.update_quantity(ProductId::new(1), None, 4).unwrap();
        assert_eq!(cart.totals().unwrap().subtotal.amount, Decimal::new(40, 0));
    }
}
