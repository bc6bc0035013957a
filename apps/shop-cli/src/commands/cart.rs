//! # Cart Commands
//!
//! Session commands for cart manipulation, returning ready-to-render views.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                        │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │                        │
//! │  │  Cart    │     │          │     │ Summary  │                        │
//! │  └──────────┘     └──────────┘     └──────────┘                        │
//! │       ▲                │                                                │
//! │       │           add_to_cart       checkout                            │
//! │       │           update_cart_item  (checkout.rs)                       │
//! │       │           increment_item                                        │
//! │       │           decrement_item                                        │
//! │       │           remove_from_cart                                      │
//! │       │                │                                                │
//! │       │                ▼                                                │
//! │       └──────────── clear_cart (or last line removed)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command returns the whole `CartView`, so a front end re-renders
//! from one value and never recomputes prices itself.

use serde::{Deserialize, Serialize};
use shop_core::{CartStore, DiscountPercent, ItemId, LineItem, Money, Quantity, QuantityChange};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::AppResult;
use crate::state::{Session, ShopConfig};

// =============================================================================
// View Models
// =============================================================================

/// One cart line as the cart page shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineView {
    #[ts(type = "number")]
    pub id: u64,
    pub name: String,
    pub image: Option<String>,
    pub quantity: u32,
    /// Discounted unit price, e.g. "$8.00 each"
    pub each: String,
    /// e.g. "(20% off)"; absent for undiscounted lines
    pub discount_label: Option<String>,
    pub line_total: String,
}

impl CartLineView {
    fn new(item: &LineItem, config: &ShopConfig) -> Self {
        CartLineView {
            id: item.id().0,
            name: item.name().to_string(),
            image: item.image().map(str::to_string),
            quantity: item.quantity().get(),
            each: format!("{} each", config.format_money(item.effective_unit_price())),
            discount_label: item.discount().map(|pct| format!("({} off)", pct)),
            line_total: config.format_money(item.line_total()),
        }
    }
}

/// The order summary card.
///
/// ```text
/// ┌──────────────────────────────┐
/// │  Order Summary               │
/// │  Items (3):          $25.00  │
/// │  Discount:           -$4.00  │
/// │  Tax (8%):            $1.68  │
/// │  Shipping:             Free  │
/// │  ──────────────────────────  │
/// │  Total:              $22.68  │
/// └──────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderSummaryView {
    #[ts(type = "number")]
    pub item_count: u64,
    /// "Items (3)"
    pub items_label: String,
    pub subtotal: String,
    /// Present only when some line is discounted
    pub discount: Option<String>,
    /// "Tax (8%)"
    pub tax_label: String,
    pub tax: String,
    pub shipping: String,
    pub total: String,
}

/// Everything the cart page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartView {
    /// True when the page should show the "Your Cart is Empty" state
    pub is_empty: bool,
    /// Distinct lines ("Cart Items (2)")
    #[ts(type = "number")]
    pub line_count: usize,
    pub lines: Vec<CartLineView>,
    pub summary: OrderSummaryView,
}

impl CartView {
    /// Builds the view from the cart's current state.
    pub fn new(cart: &CartStore, config: &ShopConfig) -> Self {
        let totals = cart.totals();

        let discount = (!totals.discount.rounded().is_zero())
            .then(|| config.format_money(Money::zero() - totals.discount));

        CartView {
            is_empty: cart.is_empty(),
            line_count: totals.line_count,
            lines: cart
                .items()
                .iter()
                .map(|item| CartLineView::new(item, config))
                .collect(),
            summary: OrderSummaryView {
                item_count: totals.item_count,
                items_label: format!("Items ({})", totals.item_count),
                subtotal: config.format_money(totals.subtotal),
                discount,
                tax_label: format!("Tax ({})", cart.tax_rate()),
                tax: config.format_money(totals.tax),
                shipping: config.shipping_label.clone(),
                total: config.format_money(totals.grand_total),
            },
        }
    }

    fn of(session: &Session) -> Self {
        CartView::new(session.cart(), session.config())
    }
}

// =============================================================================
// Requests
// =============================================================================

/// A product being added from a listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub id: ItemId,
    pub name: String,
    pub unit_price: Money,
    #[serde(default = "default_quantity")]
    pub quantity: Quantity,
    #[serde(default)]
    pub discount: Option<DiscountPercent>,
    #[serde(default)]
    pub image: Option<String>,
}

fn default_quantity() -> Quantity {
    Quantity::ONE
}

impl AddToCartRequest {
    fn into_line_item(self) -> AppResult<LineItem> {
        let mut item = LineItem::new(self.id, self.name, self.unit_price, self.quantity)?;
        if let Some(discount) = self.discount {
            item = item.with_discount(discount);
        }
        if let Some(image) = self.image {
            item = item.with_image(image);
        }
        Ok(item)
    }
}

// =============================================================================
// Commands
// =============================================================================

/// Gets the current cart contents.
///
/// ## Returns
/// Current cart with lines and order summary
pub fn get_cart(session: &Session) -> CartView {
    debug!(session_id = %session.id(), "get_cart command");
    CartView::of(session)
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - If the id is already in the cart: its quantity becomes `quantity`
/// - Otherwise: appended as a new line
/// - Price is "frozen" at the time of the first add
///
/// ## Errors
/// `AppError::Validation` if the name or price is invalid. The cart is
/// untouched in that case.
pub fn add_to_cart(session: &mut Session, request: AddToCartRequest) -> AppResult<CartView> {
    debug!(
        item_id = %request.id,
        quantity = %request.quantity,
        "add_to_cart command"
    );

    let item = request.into_line_item()?;
    let id = item.id();
    if let Some(previous) = session.cart_mut().add_or_update(item) {
        debug!(item_id = %id, previous = %previous, "Item already in cart, quantity replaced");
    }

    Ok(CartView::of(session))
}

/// Sets a line's quantity from the raw text of the quantity field.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  User types into the quantity box                                       │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  parse_quantity_input("3")  → 3  ──► quantity = 3                      │
/// │  parse_quantity_input("")   → 0  ──► line removed                      │
/// │  parse_quantity_input("-2") → -2 ──► line removed                      │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  Cart display updates                                                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn update_cart_item(session: &mut Session, id: ItemId, raw_quantity: &str) -> CartView {
    let requested = shop_core::validation::parse_quantity_input(raw_quantity);
    debug!(item_id = %id, raw = %raw_quantity, requested, "update_cart_item command");

    let change = session.cart_mut().set_quantity(id, requested);
    log_change(id, requested, change);

    CartView::of(session)
}

/// The `+` control.
pub fn increment_item(session: &mut Session, id: ItemId) -> CartView {
    debug!(item_id = %id, "increment_item command");

    let requested = current_quantity(session.cart(), id) + 1;
    let change = session.cart_mut().increment(id);
    log_change(id, requested, change);

    CartView::of(session)
}

/// The `−` control. At quantity 1 this removes the line.
pub fn decrement_item(session: &mut Session, id: ItemId) -> CartView {
    debug!(item_id = %id, "decrement_item command");

    let requested = current_quantity(session.cart(), id) - 1;
    let change = session.cart_mut().decrement(id);
    log_change(id, requested, change);

    CartView::of(session)
}

/// Removes a line from the cart. Removing an absent id is not an error.
pub fn remove_from_cart(session: &mut Session, id: ItemId) -> CartView {
    debug!(item_id = %id, "remove_from_cart command");

    if session.cart_mut().remove(id).is_none() {
        debug!(item_id = %id, "Item not in cart, nothing removed");
    }

    CartView::of(session)
}

/// Clears all lines from the cart.
pub fn clear_cart(session: &mut Session) -> CartView {
    debug!(lines = session.cart().len(), "clear_cart command");
    session.cart_mut().clear();
    CartView::of(session)
}

fn current_quantity(cart: &CartStore, id: ItemId) -> i64 {
    cart.get(id)
        .map(|item| i64::from(item.quantity().get()))
        .unwrap_or(0)
}

fn log_change(id: ItemId, requested: i64, change: QuantityChange) {
    match change {
        QuantityChange::Updated { previous, current } => {
            debug!(item_id = %id, %previous, %current, "Quantity updated");
        }
        QuantityChange::Removed { previous } => {
            debug!(item_id = %id, %previous, "Quantity below 1, line removed");
        }
        QuantityChange::TooLarge { current } => {
            warn!(
                item_id = %id,
                requested,
                %current,
                "Requested quantity too large, line unchanged"
            );
        }
        QuantityChange::NotInCart => {
            debug!(item_id = %id, "Item not in cart, nothing changed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn request(id: u64, price_cents: i64, qty: u32) -> AddToCartRequest {
        AddToCartRequest {
            id: ItemId(id),
            name: format!("Product {}", id),
            unit_price: Money::from_cents(price_cents),
            quantity: Quantity::new(qty).unwrap(),
            discount: None,
            image: None,
        }
    }

    /// [{1, $10.00, 20% off, ×2}, {2, $5.00, ×1}]
    fn reference_session() -> Session {
        let mut session = Session::default();
        let mut first = request(1, 1000, 2);
        first.discount = Some(DiscountPercent::from_whole(20).unwrap());
        add_to_cart(&mut session, first).unwrap();
        add_to_cart(&mut session, request(2, 500, 1)).unwrap();
        session
    }

    #[test]
    fn test_empty_cart_view() {
        let view = get_cart(&Session::default());

        assert!(view.is_empty);
        assert!(view.lines.is_empty());
        assert_eq!(view.summary.items_label, "Items (0)");
        assert_eq!(view.summary.total, "$0.00");
        assert_eq!(view.summary.discount, None);
    }

    #[test]
    fn test_reference_cart_view() {
        let view = get_cart(&reference_session());

        assert!(!view.is_empty);
        assert_eq!(view.line_count, 2);

        let first = &view.lines[0];
        assert_eq!(first.each, "$8.00 each");
        assert_eq!(first.discount_label.as_deref(), Some("(20% off)"));
        assert_eq!(first.line_total, "$16.00");
        assert_eq!(view.lines[1].discount_label, None);

        assert_eq!(view.summary.items_label, "Items (3)");
        assert_eq!(view.summary.subtotal, "$25.00");
        assert_eq!(view.summary.discount.as_deref(), Some("-$4.00"));
        assert_eq!(view.summary.tax_label, "Tax (8%)");
        assert_eq!(view.summary.tax, "$1.68");
        assert_eq!(view.summary.shipping, "Free");
        assert_eq!(view.summary.total, "$22.68");
    }

    #[test]
    fn test_add_invalid_item_leaves_cart_untouched() {
        let mut session = reference_session();
        let mut bad = request(3, 100, 1);
        bad.name = "   ".to_string();

        let result = add_to_cart(&mut session, bad);

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(session.cart().len(), 2);
    }

    #[test]
    fn test_add_same_id_replaces_quantity() {
        let mut session = Session::default();
        add_to_cart(&mut session, request(1, 1000, 2)).unwrap();
        let view = add_to_cart(&mut session, request(1, 1000, 5)).unwrap();

        assert_eq!(view.line_count, 1);
        assert_eq!(view.lines[0].quantity, 5);
    }

    #[test]
    fn test_update_from_raw_text() {
        let mut session = reference_session();

        let view = update_cart_item(&mut session, ItemId(2), "4");
        assert_eq!(view.lines[1].quantity, 4);

        let view = update_cart_item(&mut session, ItemId(2), "abc");
        assert_eq!(view.line_count, 1);
        assert!(session.cart().get(ItemId(2)).is_none());
    }

    #[test]
    fn test_update_stores_requested_quantity() {
        let mut session = reference_session();
        let view = update_cart_item(&mut session, ItemId(2), "5000");
        assert_eq!(view.lines[1].quantity, 5000);
        assert_eq!(view.summary.items_label, "Items (5002)");
    }

    #[test]
    fn test_update_beyond_u32_keeps_line() {
        let mut session = reference_session();
        let view = update_cart_item(&mut session, ItemId(2), "4294967296");
        assert_eq!(view.line_count, 2);
        assert_eq!(view.lines[1].quantity, 1);
    }

    #[test]
    fn test_increment_decrement_remove() {
        let mut session = reference_session();

        let view = increment_item(&mut session, ItemId(2));
        assert_eq!(view.lines[1].quantity, 2);

        decrement_item(&mut session, ItemId(2));
        let view = decrement_item(&mut session, ItemId(2));
        assert_eq!(view.line_count, 1);

        let view = remove_from_cart(&mut session, ItemId(1));
        assert!(view.is_empty);

        // Absent id stays a no-op
        let view = remove_from_cart(&mut session, ItemId(1));
        assert!(view.is_empty);
    }

    #[test]
    fn test_clear_cart() {
        let mut session = reference_session();
        let view = clear_cart(&mut session);
        assert!(view.is_empty);
        assert_eq!(view.summary.total, "$0.00");
    }

    #[test]
    fn test_add_request_from_json() {
        let json = r#"{"id": 7, "name": "Mug", "unitPrice": "12.50", "discount": "10"}"#;
        let request: AddToCartRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.quantity, Quantity::ONE);
        assert_eq!(request.unit_price, Money::from_cents(1250));

        let mut session = Session::default();
        let view = add_to_cart(&mut session, request).unwrap();
        assert_eq!(view.lines[0].each, "$11.25 each");
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let json = serde_json::to_value(get_cart(&reference_session())).unwrap();
        assert_eq!(json["isEmpty"], false);
        assert_eq!(json["summary"]["itemsLabel"], "Items (3)");
        assert_eq!(json["lines"][0]["discountLabel"], "(20% off)");
    }
}
