use crate::error::MarketError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Currency used when a catalog does not name one.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// A non-negative monetary value with 2 decimal places precision.
///
/// Wraps `rust_decimal::Decimal` so prices never pass through floating point.
/// Every constructor rescales to cents, so `Money::new(dec!(2.2))` displays as
/// `2.20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, MarketError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(MarketError::ValidationError(
                "Amount must not be negative".to_string(),
            ));
        }
        Ok(Self(to_cents(value)))
    }

    /// Builds an amount from whole cents, e.g. `from_cents(110)` is `1.10`.
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// Price of a metered purchase: `round(rate * minutes / 60, 2)`, half-up.
    pub fn metered(hourly_rate: Money, minutes: u32) -> Self {
        let raw = hourly_rate.0 * Decimal::from(minutes) / Decimal::from(60);
        Self(to_cents(raw))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

fn to_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

impl TryFrom<Decimal> for Money {
    type Error = MarketError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn money(value: Decimal) -> Money {
        Money::new(value).unwrap()
    }

    #[test]
    fn test_metered_price() {
        assert_eq!(Money::metered(money(dec!(1.60)), 90), money(dec!(2.40)));
        assert_eq!(Money::metered(money(dec!(1.10)), 120), money(dec!(2.20)));
        assert_eq!(Money::metered(money(dec!(0.30)), 480), money(dec!(2.40)));
    }

    #[test]
    fn test_metered_rounds_half_up() {
        // 0.25 * 30 / 60 = 0.125
        assert_eq!(Money::metered(money(dec!(0.25)), 30).value(), dec!(0.13));
        // 1.30 * 20 / 60 = 0.4333..
        assert_eq!(Money::metered(money(dec!(1.30)), 20).value(), dec!(0.43));
    }

    #[test]
    fn test_rescaled_to_cents() {
        assert_eq!(money(dec!(2.2)).to_string(), "2.20");
        assert_eq!(money(dec!(16)).to_string(), "16.00");
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            Money::new(dec!(-1.0)),
            Err(MarketError::ValidationError(_))
        ));
        assert!(Money::new(dec!(0)).is_ok());
    }

    #[test]
    fn test_add() {
        assert_eq!(money(dec!(1.10)) + money(dec!(0.90)), money(dec!(2.00)));
    }
}
