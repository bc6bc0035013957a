//! # State Module
//!
//! Session-scoped state for the shop shell.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────────────┐      │
//! │  │     ShopConfig       │        │          Session             │      │
//! │  │                      │        │                              │      │
//! │  │  store name          │──────► │  id, started_at              │      │
//! │  │  currency symbol     │        │  CartStore (owned)           │      │
//! │  │  tax rate            │        │  ShopConfig (copy)           │      │
//! │  │  shipping label      │        │                              │      │
//! │  └──────────────────────┘        └──────────────────────────────┘      │
//! │                                                                         │
//! │  Loaded once at startup          One per shopper, passed by &mut       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::ShopConfig;
pub use session::Session;
