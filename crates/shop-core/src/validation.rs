//! # Validation Module
//!
//! Input validation and boundary parsing for the cart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Rendering layer (text fields, +/- buttons)                   │
//! │  └── parse_quantity_input: raw text → i64, fallback 0                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Construction (THIS MODULE)                                   │
//! │  ├── LineItem::new → name, unit price (0..=MAX_UNIT_PRICE)             │
//! │  ├── Quantity::new → 1..=u32::MAX                                      │
//! │  └── DiscountPercent::new → 0..=100                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: CartStore                                                    │
//! │  └── total operations on already-valid data                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shop_core::validation::{parse_quantity_input, validate_quantity};
//!
//! // Text typed into the quantity field
//! assert_eq!(parse_quantity_input("3"), 3);
//! assert_eq!(parse_quantity_input("abc"), 0); // removes the line downstream
//!
//! assert!(validate_quantity(5).is_ok());
//! ```

use rust_decimal::Decimal;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::MAX_UNIT_PRICE;

/// Longest accepted line item name.
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a line item's display name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong {
            len,
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must fit in a `u32`
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(1..=i64::from(u32::MAX)).contains(&qty) {
        return Err(ValidationError::QuantityOutOfRange {
            value: qty,
            max: u32::MAX,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
/// - Must not exceed `MAX_UNIT_PRICE`
///
/// ## Example
/// ```rust
/// use shop_core::money::Money;
/// use shop_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_unit_price(Money::zero()).is_ok());
/// assert!(validate_unit_price(Money::from_cents(-100)).is_err());
/// assert!(validate_unit_price("1000000000000000000000000000".parse().unwrap()).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::NegativePrice(price.amount()));
    }

    if price > MAX_UNIT_PRICE {
        return Err(ValidationError::PriceTooLarge {
            price: price.amount(),
            max: MAX_UNIT_PRICE.amount(),
        });
    }

    Ok(())
}

/// Validates a discount percentage.
///
/// ## Rules
/// - Must be between 0 and 100 inclusive
pub fn validate_discount_percent(pct: Decimal) -> ValidationResult<()> {
    if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
        return Err(ValidationError::DiscountOutOfRange(pct));
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::TaxRateOutOfRange(Decimal::new(
            i64::from(bps),
            2,
        )));
    }

    Ok(())
}

// =============================================================================
// Boundary Parsing
// =============================================================================

/// Parses the text of a quantity input field.
///
/// Reads the way a number field's value is read in the browser: leading
/// whitespace is skipped, an optional sign is accepted, then the leading run
/// of ASCII digits is taken and anything after it is ignored.
///
/// ## Fallback
/// Empty text, text with no leading digits, and values that don't fit in an
/// `i64` all become `0`. Passing `0` to `CartStore::set_quantity` removes the
/// line, so garbage input never reaches the cart as a quantity.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Quantity field                                                         │
/// │                                                                         │
/// │  "3"     → 3  → set_quantity(id, 3)   → quantity updated               │
/// │  "2.7"   → 2  → set_quantity(id, 2)   → quantity updated               │
/// │  ""      → 0  → set_quantity(id, 0)   → line removed                   │
/// │  "-4"    → -4 → set_quantity(id, -4)  → line removed                   │
/// │  "abc"   → 0  → set_quantity(id, 0)   → line removed                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn parse_quantity_input(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return 0;
    }

    match rest[..digits_len].parse::<i64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) => 0,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Linen Shirt").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("  ").is_err());
        assert!(validate_item_name(&"A".repeat(201)).is_err());
        assert!(validate_item_name(&"A".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(1000).is_ok());
        assert!(validate_quantity(i64::from(u32::MAX)).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_validate_unit_price_upper_bound() {
        assert_eq!(MAX_UNIT_PRICE.amount(), Decimal::new(1_000_000_000_000, 0));
        assert!(validate_unit_price(MAX_UNIT_PRICE).is_ok());

        let just_over = MAX_UNIT_PRICE + Money::from_cents(1);
        assert_eq!(
            validate_unit_price(just_over),
            Err(ValidationError::PriceTooLarge {
                price: just_over.amount(),
                max: MAX_UNIT_PRICE.amount(),
            })
        );
        assert!(validate_unit_price(Money::from_decimal(Decimal::MAX)).is_err());
    }

    #[test]
    fn test_validate_discount_percent() {
        assert!(validate_discount_percent(Decimal::ZERO).is_ok());
        assert!(validate_discount_percent(Decimal::ONE_HUNDRED).is_ok());
        assert!(validate_discount_percent(Decimal::new(125, 1)).is_ok());
        assert!(validate_discount_percent(Decimal::new(1001, 1)).is_err());
        assert!(validate_discount_percent(Decimal::NEGATIVE_ONE).is_err());
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(800).is_ok());
        assert!(validate_tax_rate_bps(10000).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
    }

    #[test]
    fn test_parse_quantity_input_numbers() {
        assert_eq!(parse_quantity_input("3"), 3);
        assert_eq!(parse_quantity_input("  12"), 12);
        assert_eq!(parse_quantity_input("+5"), 5);
        assert_eq!(parse_quantity_input("-4"), -4);
        assert_eq!(parse_quantity_input("007"), 7);
    }

    #[test]
    fn test_parse_quantity_input_leading_digits() {
        assert_eq!(parse_quantity_input("2.7"), 2);
        assert_eq!(parse_quantity_input("3 items"), 3);
        assert_eq!(parse_quantity_input("1e3"), 1);
    }

    #[test]
    fn test_parse_quantity_input_fallback() {
        assert_eq!(parse_quantity_input(""), 0);
        assert_eq!(parse_quantity_input("   "), 0);
        assert_eq!(parse_quantity_input("abc"), 0);
        assert_eq!(parse_quantity_input("-"), 0);
        assert_eq!(parse_quantity_input(".5"), 0);
        assert_eq!(parse_quantity_input("NaN"), 0);
        assert_eq!(parse_quantity_input("99999999999999999999999"), 0);
    }
}
