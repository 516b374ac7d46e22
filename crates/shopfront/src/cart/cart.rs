//! Cart and line item types.

use crate::cart::{CartTotals, PricingPolicy};
use crate::catalog::ProductRef;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// Identity of a cart line: product plus optional variant.
///
/// `None` is its own variant, distinct from every named one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub variant: Option<String>,
}

impl LineKey {
    pub fn new(product_id: ProductId, variant: Option<&str>) -> Self {
        Self {
            product_id,
            variant: variant.map(str::to_string),
        }
    }

    fn matches(&self, product_id: ProductId, variant: Option<&str>) -> bool {
        self.product_id == product_id && self.variant.as_deref() == variant
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.variant {
            Some(variant) => write!(f, "{} ({})", self.product_id, variant),
            None => write!(f, "{}", self.product_id),
        }
    }
}

/// A shopping cart.
///
/// Lines keep the order in which their key was first added. Each key has
/// at most one line and every line has a quantity of at least one; lines
/// only change through [`Cart::add_item`], [`Cart::update_quantity`] and
/// [`Cart::remove_item`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Cart {
    items: Vec<LineItem>,
    /// Cart currency.
    pub currency: Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Add an item to the cart.
    ///
    /// An existing line with the same product and variant has its quantity
    /// increased; its name, price and image stay as first recorded.
    ///
    /// Returns an error if:
    /// - The product reference is invalid
    /// - Quantity is not positive
    /// - The resulting quantity would exceed MAX_QUANTITY_PER_ITEM
    pub fn add_item(
        &mut self,
        product: &ProductRef,
        quantity: i64,
        variant: Option<&str>,
    ) -> Result<LineKey, CommerceError> {
        product.validate()?;
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self.find_mut(product.id, variant) {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            check_limit(new_quantity)?;
            // Validate the new line total before committing.
            existing.unit_price.try_multiply(new_quantity)?;

            existing.quantity = new_quantity;
            tracing::debug!(
                line = %existing.key,
                quantity = new_quantity,
                "increased cart line quantity"
            );
            return Ok(existing.key.clone());
        }

        check_limit(quantity)?;
        let item = LineItem::new(product, quantity, variant, self.currency)?;
        let key = item.key.clone();
        tracing::debug!(line = %key, quantity, "added cart line");
        self.items.push(item);
        Ok(key)
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero removes the line. Returns whether a line changed.
    /// A negative quantity is rejected even for a missing line; otherwise a
    /// missing line is a no-op.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        variant: Option<&str>,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity < 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if quantity == 0 {
            return Ok(self.remove_item(product_id, variant));
        }

        let Some(item) = self.find_mut(product_id, variant) else {
            return Ok(false);
        };
        check_limit(quantity)?;
        item.unit_price.try_multiply(quantity)?;
        item.quantity = quantity;
        tracing::debug!(line = %item.key, quantity, "set cart line quantity");
        Ok(true)
    }

    /// Remove a line. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: ProductId, variant: Option<&str>) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| !i.key.matches(product_id, variant));
        let removed = self.items.len() < len_before;
        if removed {
            tracing::debug!(product_id = %product_id, ?variant, "removed cart line");
        }
        removed
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a line by product and variant.
    pub fn line(&self, product_id: ProductId, variant: Option<&str>) -> Option<&LineItem> {
        self.items.iter().find(|i| i.key.matches(product_id, variant))
    }

    /// Like [`Cart::line`], but a missing line is an error.
    pub fn require_line(
        &self,
        product_id: ProductId,
        variant: Option<&str>,
    ) -> Result<&LineItem, CommerceError> {
        self.line(product_id, variant)
            .ok_or_else(|| CommerceError::LineNotFound(LineKey::new(product_id, variant).to_string()))
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.items.iter().try_fold(Money::zero(self.currency), |acc, item| {
            acc.try_add(&item.line_total()?)
        })
    }

    /// Calculate totals with the default pricing policy.
    ///
    /// Recomputed on every call.
    pub fn totals(&self) -> Result<CartTotals, CommerceError> {
        PricingPolicy::default().quote(self)
    }

    fn find_mut(&mut self, product_id: ProductId, variant: Option<&str>) -> Option<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|i| i.key.matches(product_id, variant))
    }
}

fn check_limit(quantity: i64) -> Result<(), CommerceError> {
    if quantity > MAX_QUANTITY_PER_ITEM {
        return Err(CommerceError::QuantityExceedsLimit(
            quantity,
            MAX_QUANTITY_PER_ITEM,
        ));
    }
    Ok(())
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product and variant this line is keyed by.
    pub key: LineKey,
    /// Product name (snapshot at first add).
    pub name: String,
    /// Unit price (snapshot at first add).
    pub unit_price: Money,
    /// Image reference (snapshot at first add).
    pub image: String,
    /// Quantity, always at least 1.
    pub quantity: i64,
}

impl LineItem {
    fn new(
        product: &ProductRef,
        quantity: i64,
        variant: Option<&str>,
        currency: Currency,
    ) -> Result<Self, CommerceError> {
        let unit_price = Money::new(product.price, currency);
        unit_price.try_multiply(quantity)?;
        Ok(Self {
            key: LineKey::new(product.id, variant),
            name: product.name.clone(),
            unit_price,
            image: product.image.clone(),
            quantity,
        })
    }

    pub fn product_id(&self) -> ProductId {
        self.key.product_id
    }

    pub fn variant(&self) -> Option<&str> {
        self.key.variant.as_deref()
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price.try_multiply(self.quantity)
    }
}
