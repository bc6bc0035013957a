//! # shop-core: Pure Cart Pricing for the Storefront
//!
//! This crate is the **heart** of the storefront cart. It owns the cart's
//! line items and every price derived from them, as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Rendering Layer                              │   │
//! │  │    Cart page ──► Order summary ──► Checkout button              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Session Commands (shop-cli)                  │   │
//! │  │    get_cart, add_to_cart, update_cart_item, checkout, etc.      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shop-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │ LineItem  │  │   Money   │  │ CartStore │  │  rules    │  │   │
//! │  │   │ TaxRate   │  │  Decimal  │  │ CartTotals│  │  parsing  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, Quantity, DiscountPercent, TaxRate)
//! - [`money`] - Money type backed by exact decimals
//! - [`cart`] - The CartStore and its derived totals
//! - [`error`] - Validation error types
//! - [`validation`] - Business rule validation and input parsing
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every query is deterministic - same cart = same totals
//! 2. **Total Operations**: Cart mutations never fail; absent ids are no-ops
//! 3. **Exact Money**: Amounts are decimals, rounded only for display
//! 4. **Invalid Items Can't Exist**: Line items are validated when built
//!
//! ## Example Usage
//!
//! ```rust
//! use shop_core::{CartStore, ItemId, LineItem, Money, Quantity, DiscountPercent};
//!
//! let mut cart = CartStore::default(); // 8% tax
//!
//! let shirt = LineItem::new(ItemId(1), "T-Shirt", Money::from_cents(1000), Quantity::new(2).unwrap())
//!     .unwrap()
//!     .with_discount(DiscountPercent::from_whole(20).unwrap());
//! let socks = LineItem::new(ItemId(2), "Socks", Money::from_cents(500), Quantity::new(1).unwrap())
//!     .unwrap();
//!
//! cart.add_or_update(shirt);
//! cart.add_or_update(socks);
//!
//! assert_eq!(cart.subtotal(), Money::from_cents(2500));
//! assert_eq!(cart.total_after_discount(), Money::from_cents(2100));
//! assert_eq!(cart.tax(), Money::from_cents(168));
//! assert_eq!(cart.grand_total().to_string(), "$22.68");
//! assert_eq!(cart.item_count(), 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartStore, CartTotals, QuantityChange};
pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Highest accepted unit price: one trillion.
///
/// ## Arithmetic Headroom
/// `Decimal` tops out near 7.9e28. A line at this price and `u32::MAX`
/// units is about 4.3e21, so line totals, discounts and tax never overflow,
/// and a cart would need over ten million such lines to overflow its sums.
pub const MAX_UNIT_PRICE: Money = Money::from_decimal(rust_decimal::Decimal::from_parts(
    0xD4A5_1000,
    0xE8,
    0,
    false,
    0,
));

/// Default sales tax: 800 bps = 8%.
pub const DEFAULT_TAX_RATE_BPS: u32 = 800;

/// Fractional digits shown for every amount.
pub const DISPLAY_DECIMALS: u32 = 2;
