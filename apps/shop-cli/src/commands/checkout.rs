//! # Checkout Command
//!
//! Produces the checkout handoff for whatever takes payment next.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "Proceed to Checkout"                                                  │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  Cart empty? ──yes──► AppError::EmptyCart                               │
//! │          │                                                              │
//! │          no                                                             │
//! │          ▼                                                              │
//! │  CheckoutSummary (amounts rounded to cents)                             │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  JSON handoff                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checkout only reads the cart. Clearing it after payment is the caller's
//! decision.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shop_core::{DiscountPercent, LineItem, Money, TaxRate};
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::state::Session;

/// One line of the checkout handoff.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutLine {
    #[ts(type = "number")]
    pub id: u64,
    pub name: String,
    pub quantity: u32,
    #[ts(type = "string")]
    pub unit_price: Money,
    #[ts(type = "string | null")]
    pub discount_percent: Option<DiscountPercent>,
    #[ts(type = "string")]
    pub line_total: Money,
}

impl From<&LineItem> for CheckoutLine {
    fn from(item: &LineItem) -> Self {
        CheckoutLine {
            id: item.id().0,
            name: item.name().to_string(),
            quantity: item.quantity().get(),
            unit_price: item.unit_price().rounded(),
            discount_percent: item.discount(),
            line_total: item.line_total().rounded(),
        }
    }
}

/// Everything a payment step needs from the cart.
///
/// Amounts are rounded to cents. Each is rounded from its exact value, so
/// `grand_total` may differ by a cent from `subtotal - discount + tax`.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutSummary {
    #[ts(type = "string")]
    pub session_id: Uuid,
    #[ts(type = "string")]
    pub cart_created_at: DateTime<Utc>,
    pub lines: Vec<CheckoutLine>,
    #[ts(type = "number")]
    pub item_count: u64,
    pub currency_symbol: String,
    pub tax_rate: TaxRate,
    #[ts(type = "string")]
    pub subtotal: Money,
    #[ts(type = "string")]
    pub discount: Money,
    #[ts(type = "string")]
    pub tax: Money,
    #[ts(type = "string")]
    pub grand_total: Money,
}

/// Builds the checkout handoff for the session's cart.
///
/// ## Errors
/// `AppError::EmptyCart` when there is nothing to check out.
pub fn checkout(session: &Session) -> AppResult<CheckoutSummary> {
    let cart = session.cart();
    debug!(session_id = %session.id(), lines = cart.len(), "checkout command");

    if cart.is_empty() {
        return Err(AppError::EmptyCart);
    }

    let totals = cart.totals();
    let summary = CheckoutSummary {
        session_id: session.id(),
        cart_created_at: cart.created_at(),
        lines: cart.items().iter().map(CheckoutLine::from).collect(),
        item_count: totals.item_count,
        currency_symbol: session.config().currency_symbol.clone(),
        tax_rate: cart.tax_rate(),
        subtotal: totals.subtotal.rounded(),
        discount: totals.discount.rounded(),
        tax: totals.tax.rounded(),
        grand_total: totals.grand_total.rounded(),
    };

    info!(
        session_id = %summary.session_id,
        item_count = summary.item_count,
        grand_total = %summary.grand_total,
        "Checkout summary prepared"
    );

    Ok(summary)
}

/// Serializes the checkout handoff as pretty JSON.
pub fn checkout_json(session: &Session) -> AppResult<String> {
    let summary = checkout(session)?;
    Ok(serde_json::to_string_pretty(&summary)?)
}
