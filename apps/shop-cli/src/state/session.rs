//! # Session State
//!
//! One shopper's session: the cart they are filling and the configuration
//! it is priced under.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Ownership                                    │
//! │                                                                         │
//! │  main ──► Session::new(config)                                          │
//! │                │                                                        │
//! │                ├── id: Uuid          (stable for the session)           │
//! │                ├── started_at        (UTC)                              │
//! │                ├── config: ShopConfig (read only)                       │
//! │                └── cart: CartStore   (owned by value)                   │
//! │                                                                         │
//! │  commands::cart::*(&mut Session, ..)    one command at a time           │
//! │  commands::checkout::checkout(&Session)                                 │
//! │                                                                         │
//! │  Session dropped ──► cart discarded                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no lock: the shell is the only caller, and it holds the
//! session by `&mut` for the duration of each command.

use chrono::{DateTime, Utc};
use shop_core::CartStore;
use uuid::Uuid;

use super::config::ShopConfig;

/// A shopping session owning exactly one cart.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    config: ShopConfig,
    cart: CartStore,
}

impl Session {
    /// Starts a session with an empty cart priced at the configured tax rate.
    pub fn new(config: ShopConfig) -> Self {
        let cart = CartStore::new(config.pricing());
        Session {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            config,
            cart,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// Read access to the cart.
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Write access to the cart.
    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(ShopConfig::default())
    }
}
