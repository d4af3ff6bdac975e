//! Money types backed by integer minor units
//!
//! This module provides a type-safe representation of monetary values.
//! Amounts are stored as integer minor units (cents, yen, ...) so ledger
//! arithmetic is exact; there is no floating-point anywhere in the engine.
//! `rust_decimal` is used only at the boundary to convert major-unit
//! amounts (e.g. "45.50") to and from minor units.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    JPY,
    CHF,
    AUD,
    CAD,
    MXN,
    THB,
    VND,
}

impl Currency {
    /// Returns the number of minor-unit digits for this currency
    pub fn minor_digits(&self) -> u32 {
        match self {
            Currency::JPY | Currency::VND => 0,
            _ => 2,
        }
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
            Currency::CHF => "CHF",
            Currency::AUD => "A$",
            Currency::CAD => "C$",
            Currency::MXN => "MX$",
            Currency::THB => "฿",
            Currency::VND => "₫",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
            Currency::AUD => "AUD",
            Currency::CAD => "CAD",
            Currency::MXN => "MXN",
            Currency::THB => "THB",
            Currency::VND => "VND",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "JPY" => Ok(Currency::JPY),
            "CHF" => Ok(Currency::CHF),
            "AUD" => Ok(Currency::AUD),
            "CAD" => Ok(Currency::CAD),
            "MXN" => Ok(Currency::MXN),
            "THB" => Ok(Currency::THB),
            "VND" => Ok(Currency::VND),
            other => Err(MoneyError::InvalidOperand(format!(
                "unsupported currency code: {}",
                other
            ))),
        }
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    #[error("Overflow during calculation")]
    Overflow,
}

/// A monetary amount with associated currency
///
/// The amount is an `i64` count of minor units. Splitting distributes the
/// integer remainder deterministically, so the sum of the shares always
/// equals the original amount exactly - no unit is ever created or lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    minor: i64,
    currency: Currency,
}

impl Money {
    /// Creates Money from an integer amount in minor units (e.g., cents)
    pub fn from_minor(minor: i64, currency: Currency) -> Self {
        Self { minor, currency }
    }

    /// Creates Money from a major-unit decimal amount (e.g., "45.50")
    ///
    /// Fails with `InvalidOperand` if the amount carries more precision than
    /// the currency's minor unit, and `Overflow` if it does not fit in i64.
    pub fn from_major(amount: Decimal, currency: Currency) -> Result<Self, MoneyError> {
        let factor = Decimal::from(10_i64.pow(currency.minor_digits()));
        let scaled = amount.checked_mul(factor).ok_or(MoneyError::Overflow)?;
        if scaled != scaled.trunc() {
            return Err(MoneyError::InvalidOperand(format!(
                "{} has sub-{} precision",
                amount, currency
            )));
        }
        let minor = scaled.to_i64().ok_or(MoneyError::Overflow)?;
        Ok(Self { minor, currency })
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self { minor: 0, currency }
    }

    /// Returns the amount in minor units
    pub fn minor_units(&self) -> i64 {
        self.minor
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the amount as a major-unit decimal (for display and DTOs)
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.minor, self.currency.minor_digits())
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.minor == 0
    }

    /// Returns true if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.minor > 0
    }

    /// Returns true if the amount is strictly negative
    pub fn is_negative(&self) -> bool {
        self.minor < 0
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self {
            minor: self.minor.abs(),
            currency: self.currency,
        }
    }

    /// Checked addition that returns an error on currency mismatch or overflow
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.require_same_currency(other)?;
        let minor = self
            .minor
            .checked_add(other.minor)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self {
            minor,
            currency: self.currency,
        })
    }

    /// Checked subtraction that returns an error on currency mismatch or overflow
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.require_same_currency(other)?;
        let minor = self
            .minor
            .checked_sub(other.minor)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self {
            minor,
            currency: self.currency,
        })
    }

    /// Compares two amounts of the same currency
    pub fn compare(&self, other: &Money) -> Result<Ordering, MoneyError> {
        self.require_same_currency(other)?;
        Ok(self.minor.cmp(&other.minor))
    }

    /// Splits the amount into `parts` shares that sum to the amount exactly
    ///
    /// Each share is `amount / parts` rounded toward zero; the remainder is
    /// distributed one minor unit at a time to the first `remainder` positions.
    /// The split is sign-symmetric: the shares of a negated amount are the
    /// negated shares, which is what lets a reversing ledger entry restore
    /// balances exactly.
    pub fn split_evenly(&self, parts: usize) -> Result<Vec<Money>, MoneyError> {
        if parts == 0 {
            return Err(MoneyError::InvalidOperand(
                "cannot split among zero parts".to_string(),
            ));
        }

        let magnitude = (self.minor as i128).unsigned_abs();
        let n = parts as u128;
        let base = magnitude / n;
        let remainder = (magnitude % n) as usize;

        let shares = (0..parts)
            .map(|i| {
                let share = base + u128::from(i < remainder);
                self.signed_share(share)
            })
            .collect();
        Ok(shares)
    }

    /// Splits the amount proportionally to `weights`, one share per weight
    ///
    /// Share `i` is `floor(amount * weights[i] / sum(weights))`; the integer
    /// remainder is distributed one minor unit at a time by descending weight,
    /// then by position for equal weights. A zero weight yields a zero share
    /// and never receives a remainder unit. Sign-symmetric like
    /// [`split_evenly`](Self::split_evenly).
    pub fn split_weighted(&self, weights: &[u64]) -> Result<Vec<Money>, MoneyError> {
        if weights.is_empty() {
            return Err(MoneyError::InvalidOperand(
                "cannot split with no weights".to_string(),
            ));
        }
        let total: u128 = weights.iter().map(|w| u128::from(*w)).sum();
        if total == 0 {
            return Err(MoneyError::InvalidOperand(
                "weights must sum to a positive value".to_string(),
            ));
        }

        let magnitude = (self.minor as i128).unsigned_abs();
        let mut shares: Vec<u128> = weights
            .iter()
            .map(|w| magnitude * u128::from(*w) / total)
            .collect();

        let allocated: u128 = shares.iter().sum();
        let remainder = (magnitude - allocated) as usize;

        // Remainder goes to the heaviest weights first; position breaks ties.
        // Since each fractional loss is < 1 per non-zero weight, the remainder
        // never reaches a zero-weight position.
        let mut order: Vec<usize> = (0..weights.len()).collect();
        order.sort_by(|&a, &b| weights[b].cmp(&weights[a]).then(a.cmp(&b)));
        for &idx in order.iter().take(remainder) {
            shares[idx] += 1;
        }

        Ok(shares.into_iter().map(|s| self.signed_share(s)).collect())
    }

    fn signed_share(&self, magnitude: u128) -> Money {
        // Shares are bounded by |self.minor|, so the cast cannot overflow.
        let share = magnitude as i64;
        Money {
            minor: if self.minor < 0 { -share } else { share },
            currency: self.currency,
        }
    }

    fn require_same_currency(&self, other: &Money) -> Result<(), MoneyError> {
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
        let dp = self.currency.minor_digits() as usize;
        write!(f, "{} {:.dp$}", self.currency.symbol(), self.to_decimal(), dp = dp)
    }
}

impl PartialOrd for Money {
    /// Amounts of different currencies are incomparable
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.currency == other.currency).then(|| self.minor.cmp(&other.minor))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(&other)
            .expect("Currency mismatch or overflow in Money::add")
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.checked_sub(&other)
            .expect("Currency mismatch or overflow in Money::sub")
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            minor: -self.minor,
            currency: self.currency,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn even_split_conserves_the_amount(
            minor in -1_000_000_000i64..1_000_000_000i64,
            parts in 1usize..100usize
        ) {
            let money = Money::from_minor(minor, Currency::USD);
            let shares = money.split_evenly(parts).unwrap();

            prop_assert_eq!(shares.len(), parts);
            let total: i64 = shares.iter().map(Money::minor_units).sum();
            prop_assert_eq!(total, minor);
        }

        #[test]
        fn weighted_split_conserves_the_amount(
            minor in -1_000_000_000i64..1_000_000_000i64,
            weights in proptest::collection::vec(0u64..1000, 1..30)
        ) {
            prop_assume!(weights.iter().sum::<u64>() > 0);

            let money = Money::from_minor(minor, Currency::USD);
            let shares = money.split_weighted(&weights).unwrap();

            let total: i64 = shares.iter().map(Money::minor_units).sum();
            prop_assert_eq!(total, minor);
        }

        #[test]
        fn shares_never_differ_by_more_than_one_unit(
            minor in 0i64..1_000_000_000i64,
            parts in 1usize..100usize
        ) {
            let money = Money::from_minor(minor, Currency::USD);
            let shares = money.split_evenly(parts).unwrap();

            let min = shares.iter().map(Money::minor_units).min().unwrap();
            let max = shares.iter().map(Money::minor_units).max().unwrap();
            prop_assert!(max - min <= 1);
        }

        #[test]
        fn addition_is_associative(
            a in -1_000_000i64..1_000_000i64,
            b in -1_000_000i64..1_000_000i64,
            c in -1_000_000i64..1_000_000i64
        ) {
            let ma = Money::from_minor(a, Currency::USD);
            let mb = Money::from_minor(b, Currency::USD);
            let mc = Money::from_minor(c, Currency::USD);

            prop_assert_eq!((ma + mb) + mc, ma + (mb + mc));
        }
    }
}
