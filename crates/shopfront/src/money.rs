//! Money type for representing monetary values.
//!
//! Amounts are exact decimals. Nothing is rounded while computing totals;
//! rounding to the currency's minor unit happens only when formatting.

use crate::error::CommerceError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::CAD => "CA$",
            Currency::AUD => "A$",
        }
    }

    /// Number of decimal places shown for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Exact amount in the currency's major unit (dollars, not cents).
    pub amount: Decimal,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value.
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Create a Money value from minor units.
    ///
    /// ```
    /// use shopfront::money::{Currency, Money};
    /// let price = Money::from_cents(2999, Currency::USD);
    /// assert_eq!(price.display(), "$29.99");
    /// ```
    pub fn from_cents(cents: i64, currency: Currency) -> Self {
        Self::new(Decimal::new(cents, 2), currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Amount rounded half away from zero to the currency's minor unit.
    pub fn rounded(&self) -> Decimal {
        self.amount.round_dp_with_strategy(
            self.currency.decimal_places(),
            RoundingStrategy::MidpointAwayFromZero,
        )
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", self.rounded())
    }

    /// Add another Money value of the same currency.
    pub fn try_add(&self, other: &Money) -> Result<Money, CommerceError> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(CommerceError::Overflow)?;
        Ok(Money::new(amount, self.currency))
    }

    /// Subtract another Money value of the same currency.
    pub fn try_subtract(&self, other: &Money) -> Result<Money, CommerceError> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or(CommerceError::Overflow)?;
        Ok(Money::new(amount, self.currency))
    }

    /// Multiply by a quantity.
    pub fn try_multiply(&self, quantity: i64) -> Result<Money, CommerceError> {
        let amount = self
            .amount
            .checked_mul(Decimal::from(quantity))
            .ok_or(CommerceError::Overflow)?;
        Ok(Money::new(amount, self.currency))
    }

    /// Multiply by a decimal rate (e.g., a tax rate of `0.08`).
    pub fn try_scale(&self, rate: Decimal) -> Result<Money, CommerceError> {
        let amount = self
            .amount
            .checked_mul(rate)
            .ok_or(CommerceError::Overflow)?;
        Ok(Money::new(amount, self.currency))
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), CommerceError> {
        if self.currency != other.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let m = Money::from_cents(4999, Currency::USD);
        assert_eq!(m.amount, Decimal::new(4999, 2));
        assert_eq!(m.currency, Currency::USD);
    }

    #[test]
    fn test_money_display_rounds_only_for_output() {
        let m = Money::new(Decimal::new(71976, 4), Currency::USD);
        assert_eq!(m.display(), "$7.20");
        assert_eq!(m.amount, Decimal::new(71976, 4));

        let m = Money::from_cents(500, Currency::EUR);
        assert_eq!(m.display(), "\u{20ac}5.00");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_cents(1000, Currency::USD);
        let b = Money::from_cents(300, Currency::USD);
        assert_eq!(a.try_add(&b).unwrap(), Money::from_cents(1300, Currency::USD));
        assert_eq!(a.try_subtract(&b).unwrap(), Money::from_cents(700, Currency::USD));
        assert_eq!(a.try_multiply(3).unwrap(), Money::from_cents(3000, Currency::USD));
        assert_eq!(
            a.try_scale(Decimal::new(8, 2)).unwrap(),
            Money::from_cents(80, Currency::USD)
        );
    }

    #[test]
    fn test_money_currency_mismatch() {
        let usd = Money::from_cents(1000, Currency::USD);
        let eur = Money::from_cents(1000, Currency::EUR);
        assert!(matches!(
            usd.try_add(&eur),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_money_overflow() {
        let huge = Money::new(Decimal::MAX, Currency::USD);
        assert_eq!(huge.try_multiply(2), Err(CommerceError::Overflow));
    }
}
