//! # Error Types
//!
//! The one error shop-core can produce: input that can't become cart data.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Boundaries                                │
//! │                                                                         │
//! │  LineItem::new ──────────► EmptyName, NameTooLong, NegativePrice,       │
//! │                            PriceTooLarge                                │
//! │  Quantity::new ──────────► QuantityOutOfRange                           │
//! │  DiscountPercent::new ───► DiscountOutOfRange                           │
//! │  TaxRate::parse_* ───────► TaxRateOutOfRange, TaxRateTooPrecise         │
//! │  FromStr impls ──────────► NotANumber                                   │
//! │                                                                         │
//! │  CartStore ──────────────► (none, every operation is total)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages carry the rejected value so a front end can show them as-is.

use rust_decimal::Decimal;
use thiserror::Error;

/// Rejected cart input.
///
/// Raised while constructing cart data, before it can reach a `CartStore`.
/// Once a value exists, the invariant it checks holds for its whole life.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("item name is required")]
    EmptyName,

    #[error("item name must be at most {max} characters (got {len})")]
    NameTooLong { len: usize, max: usize },

    #[error("unit price cannot be negative (got {0})")]
    NegativePrice(Decimal),

    #[error("unit price must be at most {max} (got {price})")]
    PriceTooLarge { price: Decimal, max: Decimal },

    #[error("quantity must be between 1 and {max} (got {value})")]
    QuantityOutOfRange { value: i64, max: u32 },

    #[error("discount must be between 0% and 100% (got {0}%)")]
    DiscountOutOfRange(Decimal),

    #[error("tax rate must be between 0% and 100% (got {0}%)")]
    TaxRateOutOfRange(Decimal),

    /// Basis points are the finest unit a tax rate is stored in.
    #[error("tax rate {0}% has more than two decimal places")]
    TaxRateTooPrecise(Decimal),

    /// Text that should have been a number.
    #[error("'{input}' is not a valid {field}")]
    NotANumber { field: &'static str, input: String },
}

impl ValidationError {
    pub(crate) fn not_a_number(field: &'static str, input: &str) -> Self {
        ValidationError::NotANumber {
            field,
            input: input.trim().to_string(),
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_include_rejected_value() {
        assert_eq!(
            ValidationError::QuantityOutOfRange {
                value: 0,
                max: u32::MAX,
            }
            .to_string(),
            "quantity must be between 1 and 4294967295 (got 0)"
        );
        assert_eq!(
            ValidationError::PriceTooLarge {
                price: Decimal::new(2_000_000_000_000, 0),
                max: Decimal::new(1_000_000_000_000, 0),
            }
            .to_string(),
            "unit price must be at most 1000000000000 (got 2000000000000)"
        );
        assert_eq!(
            ValidationError::DiscountOutOfRange(Decimal::new(150, 0)).to_string(),
            "discount must be between 0% and 100% (got 150%)"
        );
        assert_eq!(
            ValidationError::not_a_number("price", " ten ").to_string(),
            "'ten' is not a valid price"
        );
    }

    #[test]
    fn test_unit_variant_message() {
        assert_eq!(ValidationError::EmptyName.to_string(), "item name is required");
    }
}
