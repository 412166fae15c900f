//! Money types with precise decimal arithmetic
//!
//! Billing amounts are carried as `rust_decimal::Decimal` and rounded
//! half-away-from-zero to the currency's minor unit at each point a billing
//! rule says "round".

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub, Neg};
use thiserror::Error;

/// Number of decimal places every billed amount is rounded to
pub const BILLING_DECIMAL_PLACES: u32 = 2;

/// Rounds a value half away from zero to the given number of decimal places
///
/// `Decimal::round_dp` uses banker's rounding; billing rounds midpoints
/// away from zero (`2.345 -> 2.35`).
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a value to [`BILLING_DECIMAL_PLACES`]
pub fn round_amount(value: Decimal) -> Decimal {
    round_half_up(value, BILLING_DECIMAL_PLACES)
}

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
    AED,
    SGD,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        BILLING_DECIMAL_PLACES
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "₹",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::AED => "AED",
            Currency::SGD => "S$",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::AED => "AED",
            Currency::SGD => "SGD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Division by zero")]
    DivisionByZero,
}

/// A monetary amount with associated currency
///
/// The amount is always held at the currency's minor unit, rounded half away
/// from zero on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value, rounding to the currency's minor unit
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: round_half_up(amount, currency.decimal_places()),
            currency,
        }
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: dec!(0),
            currency,
        }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Checked addition that returns an error on currency mismatch
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(Self::new(self.amount + other.amount, self.currency))
    }

    /// Checked subtraction that returns an error on currency mismatch
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(Self::new(self.amount - other.amount, self.currency))
    }

    /// Multiplies by a scalar, rounding the product once
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.amount * factor, self.currency)
    }

    /// Divides by a scalar, rounding the quotient once
    pub fn divide(&self, divisor: Decimal) -> Result<Self, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        Ok(Self::new(self.amount / divisor, self.currency))
    }

    /// Restricts the amount to `[min, max]`
    ///
    /// Returns the restricted value and whether it differs from `self`.
    pub fn clamp_between(&self, min: &Money, max: &Money) -> Result<(Money, bool), MoneyError> {
        self.ensure_same_currency(min)?;
        self.ensure_same_currency(max)?;

        let clamped = if self.amount < min.amount {
            *min
        } else if self.amount > max.amount {
            *max
        } else {
            *self
        };
        Ok((clamped, clamped.amount != self.amount))
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        write!(
            f,
            "{} {:.dp$}",
            self.currency.symbol(),
            self.amount,
            dp = dp as usize
        )
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(&other)
            .expect("Currency mismatch in Money::add")
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.checked_sub(&other)
            .expect("Currency mismatch in Money::sub")
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.amount, self.currency)
    }
}

/// A percentage rate such as GST
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// The rate as a decimal (e.g., 0.18 for 18%)
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a decimal value (e.g., 0.18 for 18%)
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Creates a rate from a percentage (e.g., 18 for 18%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns the rate as a percentage
    pub fn as_percentage(&self) -> Decimal {
        self.value * dec!(100)
    }

    /// Applies this rate to a money amount, rounding the result once
    pub fn apply(&self, money: &Money) -> Money {
        money.multiply(self.value)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation_rounds_to_minor_unit() {
        let m = Money::new(dec!(100.505), Currency::INR);
        assert_eq!(m.amount(), dec!(100.51));
        assert_eq!(m.currency(), Currency::INR);
    }

    #[test]
    fn test_round_half_up_is_not_bankers() {
        assert_eq!(round_amount(dec!(2.345)), dec!(2.35));
        assert_eq!(round_amount(dec!(2.355)), dec!(2.36));
        assert_eq!(round_amount(dec!(-2.345)), dec!(-2.35));
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(100.00), Currency::INR);
        let b = Money::new(dec!(50.00), Currency::INR);

        assert_eq!((a + b).amount(), dec!(150.00));
        assert_eq!((a - b).amount(), dec!(50.00));
        assert_eq!((-a).amount(), dec!(-100.00));
    }

    #[test]
    fn test_currency_mismatch() {
        let inr = Money::new(dec!(100.00), Currency::INR);
        let usd = Money::new(dec!(100.00), Currency::USD);

        let result = inr.checked_add(&usd);
        assert!(matches!(result, Err(MoneyError::CurrencyMismatch(_, _))));
    }

    #[test]
    fn test_divide_by_zero() {
        let m = Money::new(dec!(10), Currency::INR);
        assert_eq!(m.divide(Decimal::ZERO), Err(MoneyError::DivisionByZero));
        assert_eq!(m.divide(dec!(3)).unwrap().amount(), dec!(3.33));
    }

    #[test]
    fn test_clamp_between() {
        let zero = Money::zero(Currency::INR);
        let cap = Money::new(dec!(118000), Currency::INR);

        let (over, clamped) = Money::new(dec!(150000), Currency::INR)
            .clamp_between(&zero, &cap)
            .unwrap();
        assert_eq!(over, cap);
        assert!(clamped);

        let (under, clamped) = Money::new(dec!(-5), Currency::INR)
            .clamp_between(&zero, &cap)
            .unwrap();
        assert_eq!(under, zero);
        assert!(clamped);

        let (inside, clamped) = Money::new(dec!(500), Currency::INR)
            .clamp_between(&zero, &cap)
            .unwrap();
        assert_eq!(inside.amount(), dec!(500));
        assert!(!clamped);
    }

    #[test]
    fn test_gst_rate_application() {
        let gst = Rate::from_percentage(dec!(18));
        let taxable = Money::new(dec!(1234.56), Currency::INR);

        assert_eq!(gst.apply(&taxable).amount(), dec!(222.22));
        assert_eq!(gst.to_string(), "18%");
    }

    #[test]
    fn test_display() {
        let m = Money::new(dec!(30000), Currency::INR);
        assert_eq!(m.to_string(), "₹ 30000.00");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn money_arithmetic_is_associative(
            a in -1_000_000i64..1_000_000i64,
            b in -1_000_000i64..1_000_000i64,
            c in -1_000_000i64..1_000_000i64
        ) {
            let ma = Money::new(Decimal::new(a, 2), Currency::INR);
            let mb = Money::new(Decimal::new(b, 2), Currency::INR);
            let mc = Money::new(Decimal::new(c, 2), Currency::INR);

            prop_assert_eq!((ma + mb) + mc, ma + (mb + mc));
        }

        #[test]
        fn rounding_moves_at_most_half_a_paisa(minor in -1_000_000_000i64..1_000_000_000i64) {
            let value = Decimal::new(minor, 4);
            let rounded = round_amount(value);
            prop_assert!((rounded - value).abs() <= dec!(0.005));
            prop_assert!(rounded.scale() <= 2);
        }
    }
}
