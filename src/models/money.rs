//! Whole-cent currency amounts
//!
//! Amounts are kept as `i64` cents. Ledger files written by older versions
//! store float amounts such as `12.5` or `9.999`, so parsing accepts any
//! number of fractional digits and rounds to the nearest cent.
//!
//! Parsed amounts are capped at [`Money::MAX`] so that sums over any
//! realistic ledger stay far inside `i64`.

use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use thiserror::Error;

/// A currency amount in cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Largest amount accepted by [`parse`](Self::parse): one billion
    pub const MAX: Money = Money(100_000_000_000);

    /// ```
    /// use expense_tracker::models::Money;
    /// assert_eq!(Money::from_cents(1050).to_plain_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Divide by a positive count, rounding half away from zero
    pub fn div_round(&self, divisor: i64) -> Self {
        debug_assert!(divisor > 0);
        let (quotient, remainder) = (self.0 / divisor, self.0 % divisor);
        if remainder.abs() * 2 >= divisor {
            Self(quotient + self.0.signum())
        } else {
            Self(quotient)
        }
    }

    /// Parse a non-negative amount such as `42`, `42.5`, `$42.50` or `9.999`
    pub fn parse(input: &str) -> Result<Self, MoneyParseError> {
        let trimmed = input.trim();
        if trimmed.starts_with('-') {
            return Err(MoneyParseError::Negative(trimmed.to_string()));
        }
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let invalid = || MoneyParseError::InvalidFormat(trimmed.to_string());

        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() || !is_digits(whole) || !is_digits(fraction) {
            return Err(invalid());
        }

        // First two fractional digits are cents, the third decides rounding
        let mut frac = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tenths = frac.next().unwrap_or(0);
        let hundredths = frac.next().unwrap_or(0);
        let round_up = frac.next().is_some_and(|d| d >= 5);

        let too_large = || MoneyParseError::TooLarge(trimmed.to_string());
        let amount = whole
            .parse::<i64>()
            .ok()
            .and_then(|w| w.checked_mul(100))
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
            .map(Self)
            .ok_or_else(too_large)?;

        if amount > Self::MAX {
            return Err(too_large());
        }
        Ok(amount)
    }

    /// Two-decimal form used in CSV files
    pub fn to_plain_string(&self) -> String {
        self.format_with_symbol("")
    }

    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{}{}{}.{:02}", sign, symbol, abs / 100, abs % 100)
    }
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    #[error("Invalid amount: '{0}'")]
    InvalidFormat(String),

    #[error("Amount cannot be negative: '{0}'")]
    Negative(String),

    #[error("Amount is too large: '{0}'")]
    TooLarge(String),
}
