//! # Domain Types
//!
//! Core domain types for the storefront cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │    Quantity     │   │ DiscountPercent │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ItemId)    │   │  u32, >= 1      │   │  Decimal 0..100 │       │
//! │  │  name           │   └─────────────────┘   └─────────────────┘       │
//! │  │  unit_price     │                                                    │
//! │  │  discount       │   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  quantity       │   │    TaxRate      │   │  PricingConfig  │       │
//! │  │  image          │   │  ─────────────  │   │  ─────────────  │       │
//! │  └─────────────────┘   │  bps (u32)      │   │  tax_rate       │       │
//! │                        │  800 = 8%       │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Validated Newtypes
//! `Quantity` and `DiscountPercent` can only be built through checked
//! constructors (serde included), so a `LineItem` can never carry a zero
//! quantity or a 150% discount.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::validation::{
    validate_discount_percent, validate_item_name, validate_quantity, validate_tax_rate_bps,
    validate_unit_price,
};
use crate::DEFAULT_TAX_RATE_BPS;

// =============================================================================
// Item Id
// =============================================================================

/// Identifier of a line item, stable within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(ItemId)
            .map_err(|_| ValidationError::not_a_number("item id", s))
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// How many units of a line item are in the cart.
///
/// Always at least 1. Zero is not a quantity: a line that would drop below 1
/// is removed from the cart instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// The smallest quantity a line can hold.
    pub const ONE: Quantity = Quantity(1);

    /// Creates a quantity, rejecting zero.
    pub fn new(qty: u32) -> ValidationResult<Self> {
        validate_quantity(i64::from(qty))?;
        Ok(Quantity(qty))
    }

    /// Returns the raw count.
    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Quantity {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Quantity::new(value)
    }
}

/// Accepts `1..=u32::MAX`; anything else is `QuantityOutOfRange`.
impl TryFrom<i64> for Quantity {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .ok()
            .filter(|&qty| qty >= 1)
            .map(Quantity)
            .ok_or(ValidationError::QuantityOutOfRange {
                value,
                max: u32::MAX,
            })
    }
}

impl From<Quantity> for u32 {
    fn from(qty: Quantity) -> Self {
        qty.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strict parse for places that build new lines; quantity text typed into
/// an existing line goes through `parse_quantity_input` instead.
impl FromStr for Quantity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let qty = s
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::not_a_number("quantity", s))?;
        Quantity::try_from(qty)
    }
}

// =============================================================================
// Discount Percent
// =============================================================================

/// A per-item percentage discount in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct DiscountPercent(Decimal);

impl DiscountPercent {
    /// Creates a discount from a decimal percentage (e.g. `12.5`).
    pub fn new(pct: Decimal) -> ValidationResult<Self> {
        validate_discount_percent(pct)?;
        Ok(DiscountPercent(pct))
    }

    /// Creates a discount from a whole percentage (e.g. `20` for 20% off).
    pub fn from_whole(pct: u32) -> ValidationResult<Self> {
        Self::new(Decimal::from(pct))
    }

    /// Returns the percentage (20% → `20`).
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Checks if this discount changes nothing.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl TryFrom<Decimal> for DiscountPercent {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        DiscountPercent::new(value)
    }
}

impl From<DiscountPercent> for Decimal {
    fn from(pct: DiscountPercent) -> Self {
        pct.0
    }
}

impl FromStr for DiscountPercent {
    type Err = ValidationError;

    /// Parses `"20"`, `"12.5"` or `"20%"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('%');
        let pct = Decimal::from_str(trimmed)
            .map_err(|_| ValidationError::not_a_number("discount", s))?;
        DiscountPercent::new(pct)
    }
}

/// Shows `20%`, `12.5%` (no trailing zeros).
impl fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 800 bps = 8% (the storefront default), 825 bps = 8.25%
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Parses a percentage string such as `"8"` or `"8.25"`.
    ///
    /// ## Example
    /// ```rust
    /// use shop_core::TaxRate;
    ///
    /// assert_eq!(TaxRate::parse_percentage("8.25").unwrap().bps(), 825);
    /// assert!(TaxRate::parse_percentage("8.255").is_err()); // finer than 1 bps
    /// assert!(TaxRate::parse_percentage("eight").is_err());
    /// ```
    pub fn parse_percentage(s: &str) -> ValidationResult<Self> {
        let pct = Decimal::from_str(s.trim().trim_end_matches('%'))
            .map_err(|_| ValidationError::not_a_number("tax rate", s))?;
        let bps = pct * Decimal::ONE_HUNDRED;
        if !bps.fract().is_zero() {
            return Err(ValidationError::TaxRateTooPrecise(pct));
        }
        if bps.is_sign_negative() && !bps.is_zero() {
            return Err(ValidationError::TaxRateOutOfRange(pct));
        }

        let bps = bps
            .to_u32()
            .ok_or(ValidationError::TaxRateOutOfRange(pct))?;
        validate_tax_rate_bps(bps)?;
        Ok(TaxRate(bps))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as an exact fraction (800 bps → `0.08`).
    #[inline]
    pub fn as_fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }

    /// Returns the rate as a percentage (800 bps → `8`).
    #[inline]
    pub fn percentage(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 2)
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(DEFAULT_TAX_RATE_BPS)
    }
}

/// Shows `8%`, `8.25%`.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage().normalize())
    }
}

// =============================================================================
// Pricing Configuration
// =============================================================================

/// The only configuration the pricing logic needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Applied to the discounted total. Default: 8%.
    pub tax_rate: TaxRate,
}

impl PricingConfig {
    /// Creates a pricing config with the given tax rate.
    pub const fn with_tax_rate(tax_rate: TaxRate) -> Self {
        PricingConfig { tax_rate }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart.
///
/// ## Snapshot Pattern
/// Name, price, discount and image are frozen when the item is built.
/// Re-adding the same id only changes the quantity; the frozen price stays.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    id: ItemId,
    name: String,
    unit_price: Money,
    discount: Option<DiscountPercent>,
    quantity: Quantity,
    image: Option<String>,
    added_at: DateTime<Utc>,
}

impl LineItem {
    /// Builds a line item with no discount and no image.
    ///
    /// ## Validation
    /// - `name` must be non-empty (after trimming) and at most 200 characters
    /// - `unit_price` must be in `0..=MAX_UNIT_PRICE`
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        unit_price: Money,
        quantity: Quantity,
    ) -> ValidationResult<Self> {
        let name = name.into();
        validate_item_name(&name)?;
        validate_unit_price(unit_price)?;

        Ok(LineItem {
            id,
            name: name.trim().to_string(),
            unit_price,
            discount: None,
            quantity,
            image: None,
            added_at: Utc::now(),
        })
    }

    /// Attaches a percentage discount. A zero discount is stored as none.
    pub fn with_discount(mut self, discount: DiscountPercent) -> Self {
        self.discount = (!discount.is_zero()).then_some(discount);
        self
    }

    /// Attaches an image reference (opaque to pricing).
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn discount(&self) -> Option<DiscountPercent> {
        self.discount
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    /// Only the cart changes quantities, and only to a valid `Quantity`.
    pub(crate) fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }

    /// Unit price after the item's discount.
    ///
    /// Never negative and never above `unit_price`, because the discount is
    /// bounded to `[0, 100]`.
    pub fn effective_unit_price(&self) -> Money {
        match self.discount {
            Some(discount) => self.unit_price.apply_percentage_discount(discount),
            None => self.unit_price,
        }
    }

    /// Pre-discount line value (`unit_price × quantity`).
    pub fn line_subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Discounted line value (`effective_unit_price × quantity`).
    pub fn line_total(&self) -> Money {
        self.effective_unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
