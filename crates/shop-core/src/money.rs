//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Percentage discounts make it worse:                                    │
//! │    $9.99 at 15% off = $8.4915 per unit - not a whole number of cents   │
//! │                                                                         │
//! │  OUR SOLUTION: Exact Decimals, Rounded Once                             │
//! │    Every derived amount keeps full precision.                           │
//! │    Rounding to 2 places happens only when a value is displayed.        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shop_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//!
//! let doubled = price * 2u32;                    // $21.98
//! let total = price + Money::from_cents(500);    // $15.99
//! assert_eq!(total.to_string(), "$15.99");
//! assert_eq!(doubled.cents_rounded(), 2198);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::{DiscountPercent, Quantity, TaxRate};
use crate::DISPLAY_DECIMALS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the store currency's major unit (dollars for USD).
///
/// ## Design Decisions
/// - **Decimal (signed)**: Exact arithmetic; discount amounts may be negative deltas
/// - **Single field tuple struct**: Zero-cost abstraction over `Decimal`
/// - **Transparent serde**: Serializes as the decimal string, e.g. `"21.00"`
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  LineItem.unit_price ──► effective_unit_price ──► line_total            │
/// │                                                                         │
/// │  CartStore.subtotal ──► total_after_discount ──► tax ──► grand_total    │
/// │                                                                         │
/// │  Only `rounded()` / `Display` ever drop precision                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from an exact decimal amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use shop_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.to_string(), "$10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Returns the exact amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Rounds to the display precision (2 places), half away from zero.
    ///
    /// This is the only place precision is dropped. Never feed a rounded
    /// value back into further cart arithmetic.
    ///
    /// ## Example
    /// ```rust
    /// use shop_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let exact = Money::from_decimal(Decimal::new(84915, 4)); // 8.4915
    /// assert_eq!(exact.rounded(), Money::from_cents(849));
    ///
    /// let midpoint = Money::from_decimal(Decimal::new(1005, 3)); // 1.005
    /// assert_eq!(midpoint.rounded(), Money::from_cents(101));
    /// ```
    pub fn rounded(&self) -> Money {
        let mut rounded = self
            .0
            .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
        // Pad to two places so "16" serializes as "16.00"
        rounded.rescale(DISPLAY_DECIMALS);
        Money(rounded)
    }

    /// Returns the display-rounded value in whole cents.
    ///
    /// Saturates at the `i64` bounds.
    pub fn cents_rounded(&self) -> i64 {
        let rounded = self.rounded().0;
        let saturated = if rounded.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        };
        rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .unwrap_or(saturated)
    }

    /// Formats the display-rounded amount with a currency prefix.
    ///
    /// ## Example
    /// ```rust
    /// use shop_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-550).format_with("€"), "-€5.50");
    /// assert_eq!(Money::zero().format_with("$"), "$0.00");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let rounded = self.rounded().0;
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!(
            "{}{}{:.prec$}",
            sign,
            symbol,
            rounded.abs(),
            prec = DISPLAY_DECIMALS as usize
        )
    }

    /// Multiplies money by a line quantity.
    ///
    /// ## Example
    /// ```rust
    /// use shop_core::{Money, Quantity};
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(Quantity::new(3).unwrap());
    /// assert_eq!(line_total, Money::from_cents(897)); // $8.97
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: Quantity) -> Self {
        Money(self.0 * Decimal::from(qty.get()))
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// `amount × ((100 - pct) / 100)`, kept exact. The factor is at most 1, so
    /// the result never grows past `amount`.
    ///
    /// ## Example
    /// ```rust
    /// use shop_core::{DiscountPercent, Money};
    ///
    /// let price = Money::from_cents(1000); // $10.00
    /// let discounted = price.apply_percentage_discount(DiscountPercent::from_whole(20).unwrap());
    /// assert_eq!(discounted, Money::from_cents(800)); // $8.00
    /// ```
    pub fn apply_percentage_discount(&self, discount: DiscountPercent) -> Money {
        let remaining = Decimal::ONE_HUNDRED - discount.value();
        Money(self.0 * (remaining / Decimal::ONE_HUNDRED))
    }

    /// Calculates tax on this amount, without rounding.
    ///
    /// ## User Workflow
    /// ```text
    /// Discounted total: $21.00
    ///      │
    ///      ▼
    /// calculate_tax(8%) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Tax: $1.68
    ///      │
    ///      ▼
    /// Grand Total: $22.68
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(self.0 * rate.as_fraction())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the display-rounded value with a `$` prefix.
///
/// ## Note
/// The session layer formats with the configured currency symbol via
/// [`Money::format_with`]; this impl is for logs and tests.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
    }
}

/// Parses `"10"`, `"10.99"` or `"$10.99"`. Negative amounts parse; price
/// validation happens when a line item is built.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let amount = Decimal::from_str(digits.trim_start_matches('$'))
            .map_err(|_| ValidationError::not_a_number("price", s))?;
        Ok(Money(if negative { -amount } else { amount }))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a plain count.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * Decimal::from(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
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
        let money = Money::from_cents(1099);
        assert_eq!(money.amount(), Decimal::new(1099, 2));
        assert_eq!(money.cents_rounded(), 1099);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_display_pads_whole_amounts() {
        let whole = Money::from_decimal(Decimal::from(21));
        assert_eq!(whole.to_string(), "$21.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!("10.99".parse::<Money>().unwrap(), Money::from_cents(1099));
        assert_eq!("$5".parse::<Money>().unwrap(), Money::from_cents(500));
        assert_eq!("-$1.50".parse::<Money>().unwrap(), Money::from_cents(-150));
        assert!("ten".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
    }

    #[test]
    fn test_rounded_serializes_two_places() {
        let json = serde_json::to_string(&Money::from_decimal(Decimal::from(16)).rounded()).unwrap();
        assert_eq!(json, "\"16.00\"");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a + b, Money::from_cents(1500));
        assert_eq!(a - b, Money::from_cents(500));
        assert_eq!(a * 3u32, Money::from_cents(3000));

        let mut acc = Money::zero();
        acc += a;
        acc -= b;
        assert_eq!(acc, Money::from_cents(500));
    }

    #[test]
    fn test_equality_ignores_scale() {
        // 21.0000 (computed) and 21.00 (literal) are the same amount
        let computed = Money::from_decimal(Decimal::new(210000, 4));
        assert_eq!(computed, Money::from_cents(2100));
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 5].iter().map(|c| Money::from_cents(*c)).sum();
        assert_eq!(total, Money::from_cents(355));

        let empty: Money = std::iter::empty::<Money>().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_tax_calculation_is_exact() {
        // $10.00 at 8.25% = $0.825, kept exact until display
        let amount = Money::from_cents(1000);
        let tax = amount.calculate_tax(TaxRate::from_bps(825));
        assert_eq!(tax.amount(), Decimal::new(825, 3));
        assert_eq!(tax.to_string(), "$0.83");
    }

    #[test]
    fn test_percentage_discount_keeps_fractional_cents() {
        // $9.99 at 15% off = $8.4915
        let price = Money::from_cents(999);
        let discounted = price.apply_percentage_discount(DiscountPercent::from_whole(15).unwrap());
        assert_eq!(discounted.amount(), Decimal::new(84915, 4));
        assert_eq!(discounted.to_string(), "$8.49");
    }

    #[test]
    fn test_discount_on_huge_amount_does_not_overflow() {
        // (100 - pct) first would overflow before the division
        let huge = Money::from_decimal(Decimal::MAX);
        let discounted = huge.apply_percentage_discount(DiscountPercent::from_whole(15).unwrap());
        assert!(discounted < huge);
        assert!(!discounted.is_negative());
    }

    #[test]
    fn test_cents_rounded_saturates() {
        assert_eq!(Money::from_decimal(Decimal::MAX).cents_rounded(), i64::MAX);
        assert_eq!(Money::from_decimal(Decimal::MIN).cents_rounded(), i64::MIN);
    }

    #[test]
    fn test_full_discount_is_zero() {
        let price = Money::from_cents(1234);
        let free = price.apply_percentage_discount(DiscountPercent::from_whole(100).unwrap());
        assert!(free.is_zero());
        assert!(!free.is_negative());
    }

    #[test]
    fn test_rounding_happens_once() {
        // Three lines of $0.333 each: rounding each first would give $0.99
        let third = Money::from_decimal(Decimal::new(333, 3));
        let total: Money = [third, third, third].into_iter().sum();
        assert_eq!(total.to_string(), "$1.00");
    }

    #[test]
    fn test_negative_checks() {
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::zero().is_negative());
        assert!(!Money::from_cents(1).is_negative());
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Money::from_cents(2268)).unwrap();
        assert_eq!(json, "\"22.68\"");
    }
}
