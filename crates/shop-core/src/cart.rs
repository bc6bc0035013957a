//! # Cart Store
//!
//! Owns the cart's line items and derives every price from them.
//!
//! ## Ownership
//! A `CartStore` belongs to exactly one shopping session. It is created
//! empty, mutated serially by its owner, and dropped with the session.
//! Nothing about it is global: callers hold it and pass `&mut` to mutate.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  User Action              CartStore                Cart Change          │
//! │  ───────────              ─────────                ───────────          │
//! │                                                                         │
//! │  Add product ────────────► add_or_update() ──────► insert / new qty    │
//! │                                                                         │
//! │  Type quantity ──────────► set_quantity() ───────► qty = n, or remove  │
//! │                                                                         │
//! │  Click + / − ────────────► increment() / decrement()                   │
//! │                                                                         │
//! │  Click trash icon ───────► remove() ─────────────► line gone           │
//! │                                                                         │
//! │  Click "Clear Cart" ─────► clear() ──────────────► empty               │
//! │                                                                         │
//! │  View summary ───────────► totals() ─────────────► (read only)         │
//! │                                                                         │
//! │  NOTE: No mutation can fail. Absent ids are no-ops, and any quantity   │
//! │        below 1 removes the line instead of being rejected.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived Values
//! ```text
//! subtotal             = Σ unit_price × quantity
//! total_after_discount = Σ effective_unit_price × quantity
//! discount_amount      = subtotal − total_after_discount
//! tax                  = total_after_discount × tax_rate
//! grand_total          = total_after_discount + tax
//! item_count           = Σ quantity
//! ```
//! Nothing is cached; every query walks the current items. All values are
//! exact, so `grand_total == total_after_discount + tax` holds to the last
//! digit. Round with [`Money::rounded`] only when displaying.

use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{ItemId, LineItem, PricingConfig, Quantity, TaxRate};

// =============================================================================
// Quantity Change
// =============================================================================

/// What `set_quantity` (and friends) did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line now holds `current` units.
    Updated { previous: Quantity, current: Quantity },
    /// The requested quantity was below 1, so the line was removed.
    Removed { previous: Quantity },
    /// The requested quantity does not fit in a `u32`; the line still holds
    /// `current` units.
    TooLarge { current: Quantity },
    /// No line with that id; nothing changed.
    NotInCart,
}

// =============================================================================
// Cart Store
// =============================================================================

/// The shopping cart and its pricing rules.
///
/// ## Invariants
/// - Items are unique by `id` (re-adding an id updates its quantity)
/// - Every item has quantity >= 1 (guaranteed by `Quantity`)
/// - Every discount is within [0, 100] (guaranteed by `DiscountPercent`)
/// - Items keep insertion order
#[derive(Debug, Clone)]
pub struct CartStore {
    items: Vec<LineItem>,
    pricing: PricingConfig,
    created_at: DateTime<Utc>,
}

impl CartStore {
    /// Creates an empty cart with the given pricing configuration.
    pub fn new(pricing: PricingConfig) -> Self {
        CartStore {
            items: Vec::new(),
            pricing,
            created_at: Utc::now(),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Inserts a line, or updates the quantity of the line with the same id.
    ///
    /// ## Behavior
    /// - New id: appended at the end of the cart
    /// - Known id: quantity replaced by `item.quantity()`; the stored name,
    ///   price, discount and image are kept
    ///
    /// ## Returns
    /// The previous quantity when the id was already in the cart.
    pub fn add_or_update(&mut self, item: LineItem) -> Option<Quantity> {
        if let Some(existing) = self.find_mut(item.id()) {
            let previous = existing.quantity();
            existing.set_quantity(item.quantity());
            return Some(previous);
        }

        self.items.push(item);
        None
    }

    /// Sets the quantity of a line from an untrusted integer.
    ///
    /// ## Behavior
    /// - `new_quantity < 1`: the line is removed (same as [`remove`](Self::remove))
    /// - `new_quantity > u32::MAX`: the line is left as it was
    /// - otherwise: the quantity is replaced with `new_quantity`
    /// - unknown id: no-op
    ///
    /// ## Example
    /// ```rust
    /// use shop_core::{CartStore, ItemId, LineItem, Money, Quantity, QuantityChange};
    ///
    /// let mut cart = CartStore::default();
    /// cart.add_or_update(
    ///     LineItem::new(ItemId(1), "Mug", Money::from_cents(1200), Quantity::ONE).unwrap(),
    /// );
    ///
    /// assert!(matches!(cart.set_quantity(ItemId(1), 4), QuantityChange::Updated { .. }));
    /// assert_eq!(cart.item_count(), 4);
    ///
    /// cart.set_quantity(ItemId(1), 1000);
    /// assert_eq!(cart.item_count(), 1000);
    ///
    /// assert!(matches!(cart.set_quantity(ItemId(1), 0), QuantityChange::Removed { .. }));
    /// assert!(cart.is_empty());
    ///
    /// assert_eq!(cart.set_quantity(ItemId(9), 2), QuantityChange::NotInCart);
    /// ```
    pub fn set_quantity(&mut self, id: ItemId, new_quantity: i64) -> QuantityChange {
        let Some(previous) = self.get(id).map(LineItem::quantity) else {
            return QuantityChange::NotInCart;
        };

        if new_quantity < 1 {
            self.remove(id);
            return QuantityChange::Removed { previous };
        }

        match Quantity::try_from(new_quantity) {
            Ok(current) => {
                if let Some(item) = self.find_mut(id) {
                    item.set_quantity(current);
                }
                QuantityChange::Updated { previous, current }
            }
            Err(_) => QuantityChange::TooLarge { current: previous },
        }
    }

    /// Adds one unit (the `+` control).
    pub fn increment(&mut self, id: ItemId) -> QuantityChange {
        match self.get(id).map(|item| i64::from(item.quantity().get())) {
            Some(current) => self.set_quantity(id, current + 1),
            None => QuantityChange::NotInCart,
        }
    }

    /// Removes one unit (the `−` control); a line at 1 is removed.
    pub fn decrement(&mut self, id: ItemId) -> QuantityChange {
        match self.get(id).map(|item| i64::from(item.quantity().get())) {
            Some(current) => self.set_quantity(id, current - 1),
            None => QuantityChange::NotInCart,
        }
    }

    /// Removes the line with this id, if present. Idempotent.
    pub fn remove(&mut self, id: ItemId) -> Option<LineItem> {
        let index = self.items.iter().position(|i| i.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Replaces the tax rate. Totals pick it up on the next query.
    pub fn set_tax_rate(&mut self, rate: TaxRate) {
        self.pricing.tax_rate = rate;
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Returns the line with this id.
    pub fn get(&self, id: ItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    fn find_mut(&mut self, id: ItemId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| i.id() == id)
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct lines (not units - see [`item_count`](Self::item_count)).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.pricing.tax_rate
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // =========================================================================
    // Pricing
    // =========================================================================

    /// Sum of pre-discount line values.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_subtotal).sum()
    }

    /// Sum of discounted line totals.
    pub fn total_after_discount(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// How much the per-item discounts saved. Never negative.
    pub fn discount_amount(&self) -> Money {
        self.subtotal() - self.total_after_discount()
    }

    /// Tax on the discounted total.
    pub fn tax(&self) -> Money {
        self.total_after_discount().calculate_tax(self.pricing.tax_rate)
    }

    /// Discounted total plus tax.
    pub fn grand_total(&self) -> Money {
        let discounted = self.total_after_discount();
        discounted + discounted.calculate_tax(self.pricing.tax_rate)
    }

    /// Total units across all lines (quantities 2 and 3 → 5).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity().get())).sum()
    }

    /// Every derived value in one snapshot.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

impl Default for CartStore {
    /// An empty cart at the default 8% tax rate.
    fn default() -> Self {
        CartStore::new(PricingConfig::default())
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Snapshot of every derived cart value, exact (unrounded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Distinct lines.
    #[ts(type = "number")]
    pub line_count: usize,
    /// Units across all lines.
    #[ts(type = "number")]
    pub item_count: u64,
    #[ts(type = "string")]
    pub subtotal: Money,
    #[ts(type = "string")]
    pub discount: Money,
    #[ts(type = "string")]
    pub total_after_discount: Money,
    #[ts(type = "string")]
    pub tax: Money,
    #[ts(type = "string")]
    pub grand_total: Money,
}

impl From<&CartStore> for CartTotals {
    fn from(cart: &CartStore) -> Self {
        let subtotal = cart.subtotal();
        let total_after_discount = cart.total_after_discount();
        let tax = total_after_discount.calculate_tax(cart.tax_rate());

        CartTotals {
            line_count: cart.len(),
            item_count: cart.item_count(),
            subtotal,
            discount: subtotal - total_after_discount,
            total_after_discount,
            tax,
            grand_total: total_after_discount + tax,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiscountPercent;

    fn line(id: u64, price_cents: i64, qty: u32) -> LineItem {
        LineItem::new(
            ItemId(id),
            format!("Product {}", id),
            Money::from_cents(price_cents),
            Quantity::new(qty).unwrap(),
        )
        .unwrap()
    }

    fn discounted(id: u64, price_cents: i64, pct: u32, qty: u32) -> LineItem {
        line(id, price_cents, qty).with_discount(DiscountPercent::from_whole(pct).unwrap())
    }

    /// [{1, $10.00, 20% off, ×2}, {2, $5.00, ×1}]
    fn reference_cart() -> CartStore {
        let mut cart = CartStore::default();
        cart.add_or_update(discounted(1, 1000, 20, 2));
        cart.add_or_update(line(2, 500, 1));
        cart
    }

    #[test]
    fn test_reference_scenario() {
        let cart = reference_cart();

        assert_eq!(cart.subtotal(), Money::from_cents(2500));
        assert_eq!(cart.total_after_discount(), Money::from_cents(2100));
        assert_eq!(cart.discount_amount(), Money::from_cents(400));
        assert_eq!(cart.tax(), Money::from_cents(168));
        assert_eq!(cart.grand_total(), Money::from_cents(2268));
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_empty_cart_is_all_zero() {
        let cart = CartStore::default();

        assert!(cart.is_empty());
        assert!(cart.subtotal().is_zero());
        assert!(cart.total_after_discount().is_zero());
        assert!(cart.discount_amount().is_zero());
        assert!(cart.tax().is_zero());
        assert!(cart.grand_total().is_zero());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_totals_snapshot_matches_queries() {
        let cart = reference_cart();
        let totals = cart.totals();

        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.subtotal, cart.subtotal());
        assert_eq!(totals.discount, cart.discount_amount());
        assert_eq!(totals.total_after_discount, cart.total_after_discount());
        assert_eq!(totals.tax, cart.tax());
        assert_eq!(totals.grand_total, cart.grand_total());
    }

    #[test]
    fn test_grand_total_is_exact_sum() {
        let mut cart = CartStore::new(PricingConfig::with_tax_rate(TaxRate::from_bps(825)));
        cart.add_or_update(discounted(1, 999, 15, 3));
        cart.add_or_update(discounted(2, 1333, 33, 7));
        cart.add_or_update(line(3, 1, 1));

        assert_eq!(cart.grand_total(), cart.total_after_discount() + cart.tax());
    }

    #[test]
    fn test_discount_amount_never_negative() {
        let mut cart = CartStore::default();
        for (id, pct) in [0u32, 1, 50, 99, 100].into_iter().enumerate() {
            cart.add_or_update(discounted(id as u64, 1234, pct, 2));
        }
        assert!(!cart.discount_amount().is_negative());
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let mut cart = CartStore::default();
        cart.add_or_update(line(1, 100, 2));
        cart.add_or_update(line(2, 100, 3));

        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_add_or_update_same_id_keeps_one_line_with_latest_quantity() {
        let mut cart = CartStore::default();

        assert_eq!(cart.add_or_update(line(1, 1000, 2)), None);
        let previous = cart.add_or_update(line(1, 1000, 5));

        assert_eq!(previous.map(|q| q.get()), Some(2));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(ItemId(1)).map(|i| i.quantity().get()), Some(5));
    }

    #[test]
    fn test_add_or_update_keeps_frozen_price() {
        let mut cart = CartStore::default();
        cart.add_or_update(line(1, 1000, 1));
        cart.add_or_update(line(1, 9999, 3));

        let item = cart.get(ItemId(1)).unwrap();
        assert_eq!(item.unit_price(), Money::from_cents(1000));
        assert_eq!(cart.subtotal(), Money::from_cents(3000));
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let mut cart = CartStore::default();
        cart.add_or_update(line(3, 100, 1));
        cart.add_or_update(line(1, 100, 1));
        cart.add_or_update(line(2, 100, 1));
        cart.add_or_update(line(1, 100, 4));

        let ids: Vec<u64> = cart.items().iter().map(|i| i.id().0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_set_quantity_replaces() {
        let mut cart = reference_cart();

        let change = cart.set_quantity(ItemId(2), 4);

        assert_eq!(
            change,
            QuantityChange::Updated {
                previous: Quantity::new(1).unwrap(),
                current: Quantity::new(4).unwrap(),
            }
        );
        assert_eq!(cart.item_count(), 6);
    }

    #[test]
    fn test_set_quantity_negative_removes_exactly_one_line() {
        let mut cart = reference_cart();
        let before = cart.len();

        let change = cart.set_quantity(ItemId(1), -3);

        assert!(matches!(change, QuantityChange::Removed { .. }));
        assert_eq!(cart.len(), before - 1);
        assert!(cart.get(ItemId(1)).is_none());
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let base = reference_cart();
        for id in [1, 2] {
            let mut via_set = base.clone();
            let mut via_remove = base.clone();

            via_set.set_quantity(ItemId(id), 0);
            via_remove.remove(ItemId(id));

            assert_eq!(via_set.items(), via_remove.items());
        }
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut cart = reference_cart();
        let before = cart.items().to_vec();

        assert_eq!(cart.set_quantity(ItemId(42), 3), QuantityChange::NotInCart);
        assert_eq!(cart.set_quantity(ItemId(42), 0), QuantityChange::NotInCart);
        assert_eq!(cart.items(), before.as_slice());
    }

    #[test]
    fn test_set_quantity_stores_large_values() {
        let mut cart = reference_cart();

        let change = cart.set_quantity(ItemId(2), 1000);

        assert_eq!(
            change,
            QuantityChange::Updated {
                previous: Quantity::ONE,
                current: Quantity::new(1000).unwrap(),
            }
        );
        assert_eq!(cart.item_count(), 1002);

        cart.set_quantity(ItemId(2), 1_000_000);
        assert_eq!(cart.get(ItemId(2)).map(|i| i.quantity().get()), Some(1_000_000));
    }

    #[test]
    fn test_add_or_update_accepts_quantity_above_999() {
        let mut cart = CartStore::default();
        cart.add_or_update(line(7, 100, 1000));
        assert_eq!(cart.item_count(), 1000);
    }

    #[test]
    fn test_set_quantity_beyond_u32_leaves_line() {
        let mut cart = reference_cart();
        let before = cart.items().to_vec();

        let change = cart.set_quantity(ItemId(2), i64::from(u32::MAX) + 1);

        assert_eq!(change, QuantityChange::TooLarge { current: Quantity::ONE });
        assert_eq!(cart.items(), before.as_slice());

        cart.set_quantity(ItemId(2), i64::from(u32::MAX));
        assert_eq!(
            cart.increment(ItemId(2)),
            QuantityChange::TooLarge {
                current: Quantity::new(u32::MAX).unwrap(),
            }
        );
    }

    #[test]
    fn test_totals_at_max_price_and_quantity_do_not_panic() {
        let mut cart = CartStore::default();
        let island = LineItem::new(
            ItemId(1),
            "Island",
            crate::MAX_UNIT_PRICE,
            Quantity::new(u32::MAX).unwrap(),
        )
        .unwrap()
        .with_discount(DiscountPercent::from_whole(15).unwrap());
        cart.add_or_update(island.clone());
        cart.add_or_update(line(2, 500, 2));

        let totals = cart.totals();
        assert_eq!(totals.grand_total, totals.total_after_discount + totals.tax);
        assert!(totals.grand_total > island.line_total());
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut cart = reference_cart();

        cart.increment(ItemId(2));
        assert_eq!(cart.get(ItemId(2)).map(|i| i.quantity().get()), Some(2));

        cart.decrement(ItemId(2));
        assert_eq!(cart.get(ItemId(2)).map(|i| i.quantity().get()), Some(1));

        // One more decrement drops the line
        assert!(matches!(cart.decrement(ItemId(2)), QuantityChange::Removed { .. }));
        assert!(cart.get(ItemId(2)).is_none());

        assert_eq!(cart.increment(ItemId(2)), QuantityChange::NotInCart);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let base = reference_cart();
        let mut once = base.clone();
        let mut twice = base.clone();

        once.remove(ItemId(1));
        assert!(twice.remove(ItemId(1)).is_some());
        assert!(twice.remove(ItemId(1)).is_none());

        assert_eq!(once.items(), twice.items());
    }

    #[test]
    fn test_clear() {
        let mut cart = reference_cart();
        cart.clear();

        assert!(cart.is_empty());
        assert!(cart.grand_total().is_zero());
    }

    #[test]
    fn test_tax_rate_override() {
        let mut cart = reference_cart();
        cart.set_tax_rate(TaxRate::zero());

        assert!(cart.tax().is_zero());
        assert_eq!(cart.grand_total(), Money::from_cents(2100));
    }

    #[test]
    fn test_derived_values_follow_mutations() {
        let mut cart = reference_cart();
        assert_eq!(cart.grand_total(), Money::from_cents(2268));

        cart.set_quantity(ItemId(1), 1);
        // 8.00 + 5.00 = 13.00, tax 1.04
        assert_eq!(cart.total_after_discount(), Money::from_cents(1300));
        assert_eq!(cart.grand_total(), Money::from_cents(1404));
    }

    #[test]
    fn test_totals_serialize_as_strings() {
        let json = serde_json::to_value(reference_cart().totals()).unwrap();
        assert_eq!(json["itemCount"], 3);
        assert_eq!(json["lineCount"], 2);
        assert!(json["grandTotal"].is_string());
    }
}
