//! # Commands Module
//!
//! Session commands exposed to the front end.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Session Commands                                 │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────┐              │
//! │  │     cart.rs          │        │    checkout.rs       │              │
//! │  │                      │        │                      │              │
//! │  │  • get_cart          │        │  • checkout          │              │
//! │  │  • add_to_cart       │        │  • checkout_json     │              │
//! │  │  • update_cart_item  │        │                      │              │
//! │  │  • increment_item    │        │                      │              │
//! │  │  • decrement_item    │        │                      │              │
//! │  │  • remove_from_cart  │        │                      │              │
//! │  │  • clear_cart        │        │                      │              │
//! │  └──────────────────────┘        └──────────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Command Pattern
//! Each command:
//! 1. Takes the `Session` (`&mut` only when it changes the cart)
//! 2. Logs the call with `debug!`
//! 3. Delegates pricing to `shop-core`
//! 4. Returns a serializable view, or `AppResult` when input can be invalid

pub mod cart;
pub mod checkout;
