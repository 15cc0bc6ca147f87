//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A purchase of 1099.97 taxed at 21%:                                    │
//! │    1099.97 * 0.21 = 230.99369999999996  → Which cent do we charge?      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    109997 cents * 2100 bps / 10000 = 23099 cents, rounded half-up       │
//! │    Every total is an exact number of cents, every time                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use agenda_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(89999); // 899.99
//!
//! // Parse a raw form field
//! let parsed = Money::parse("899.99").unwrap();
//! assert_eq!(parsed, price);
//!
//! // Arithmetic operations
//! let doubled = price * 2;
//! assert_eq!(doubled.cents(), 179998);
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::MoneyParseError;
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every monetary value in the system flows through this type: product
/// prices and costs, frozen line-item unit prices, purchase subtotals,
/// tax, and totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use agenda_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal form field ("899.99", "10", ".5") into Money.
    ///
    /// ## Rules
    /// - Optional leading minus, then digits, optionally one dot and up to
    ///   two fraction digits
    /// - At most two decimal places (`TooManyDecimals` otherwise)
    /// - Whitespace around the value is ignored
    ///
    /// ## Example
    /// ```rust
    /// use agenda_core::money::Money;
    ///
    /// assert_eq!(Money::parse("899.99").unwrap().cents(), 89999);
    /// assert_eq!(Money::parse("10").unwrap().cents(), 1000);
    /// assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
    /// assert!(Money::parse("abc").is_err());
    /// assert!(Money::parse("1.999").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Money, MoneyParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let (major, minor) = match digits.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (digits, ""),
        };

        if major.is_empty() && minor.is_empty() {
            return Err(MoneyParseError::Malformed);
        }
        if !major.chars().all(|c| c.is_ascii_digit())
            || !minor.chars().all(|c| c.is_ascii_digit())
        {
            return Err(MoneyParseError::Malformed);
        }
        if minor.len() > 2 {
            return Err(MoneyParseError::TooManyDecimals);
        }

        let major_cents = if major.is_empty() {
            0i64
        } else {
            major
                .parse::<i64>()
                .ok()
                .and_then(|v| v.checked_mul(100))
                .ok_or(MoneyParseError::Malformed)?
        };
        let minor_cents = match minor.len() {
            0 => 0,
            // One fraction digit means tenths: "10.5" is 10.50
            1 => minor.parse::<i64>().map_err(|_| MoneyParseError::Malformed)? * 10,
            _ => minor.parse::<i64>().map_err(|_| MoneyParseError::Malformed)?,
        };

        let cents = major_cents
            .checked_add(minor_cents)
            .ok_or(MoneyParseError::Malformed)?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax on this amount, rounding half-up to the cent.
    ///
    /// ## Implementation
    /// Integer math: `(cents * bps + 5000) / 10000`. The +5000 provides the
    /// half-up rounding (5000/10000 = 0.5). i128 intermediates prevent
    /// overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use agenda_core::money::Money;
    /// use agenda_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(109997); // 1099.97
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(2100)); // 21%
    /// assert_eq!(tax.cents(), 23099); // 230.99
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies money by a quantity (line totals).
    ///
    /// ## Example
    /// ```rust
    /// use agenda_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(9999); // 99.99
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 19998);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Renders the value as a plain decimal string ("899.99").
    ///
    /// Used for substring search over price fields and for DTOs that feed
    /// display formatting; currency symbols and locale are frontend
    /// concerns.
    pub fn decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// This is for debugging and logs. Use frontend formatting for actual UI
/// display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.decimal_string())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(89999);
        assert_eq!(money.cents(), 89999);
        assert_eq!(money.major(), 899);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!(Money::parse("899.99").unwrap().cents(), 89999);
        assert_eq!(Money::parse("100").unwrap().cents(), 10000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse(" 65.00 ").unwrap().cents(), 6500);
        assert_eq!(Money::parse("0").unwrap().cents(), 0);
        assert_eq!(Money::parse("-5.50").unwrap().cents(), -550);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse(""), Err(MoneyParseError::Empty));
        assert_eq!(Money::parse("   "), Err(MoneyParseError::Empty));
        assert_eq!(Money::parse("abc"), Err(MoneyParseError::Malformed));
        assert_eq!(Money::parse("12.3x"), Err(MoneyParseError::Malformed));
        assert_eq!(Money::parse("1,50"), Err(MoneyParseError::Malformed));
        assert_eq!(Money::parse("-"), Err(MoneyParseError::Malformed));
        assert_eq!(Money::parse("."), Err(MoneyParseError::Malformed));
        assert_eq!(Money::parse("1.999"), Err(MoneyParseError::TooManyDecimals));
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(89999).decimal_string(), "899.99");
        assert_eq!(Money::from_cents(500).decimal_string(), "5.00");
        assert_eq!(Money::from_cents(-550).decimal_string(), "-5.50");
        assert_eq!(Money::from_cents(0).decimal_string(), "0.00");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(-550)), "$-5.50");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let mut acc = Money::zero();
        acc += a;
        acc += b;
        assert_eq!(acc.cents(), 1500);
    }

    #[test]
    fn test_tax_at_21_percent() {
        // 200.00 at 21% = 42.00 exactly
        let subtotal = Money::from_cents(20000);
        let tax = subtotal.calculate_tax(TaxRate::from_bps(2100));
        assert_eq!(tax.cents(), 4200);
    }

    #[test]
    fn test_tax_rounding_half_up() {
        // 1099.97 * 21% = 230.9937 → 230.99
        assert_eq!(
            Money::from_cents(109997)
                .calculate_tax(TaxRate::from_bps(2100))
                .cents(),
            23099
        );
        // 159.99 * 21% = 33.5979 → 33.60
        assert_eq!(
            Money::from_cents(15999)
                .calculate_tax(TaxRate::from_bps(2100))
                .cents(),
            3360
        );
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(9999);
        assert_eq!(unit_price.multiply_quantity(2).cents(), 19998);
    }
}
