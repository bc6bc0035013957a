//! # Shop CLI Library
//!
//! Session layer for the storefront cart: configuration, the owned cart
//! session, view-model commands and a terminal shell.
//!
//! ## Module Organization
//! ```text
//! shop_cli_lib/
//! ├── lib.rs          ◄─── You are here (logging setup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── ShopConfig (file + env + defaults)
//! │   └── session.rs  ◄─── Session owning one CartStore
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Cart manipulation commands + views
//! │   └── checkout.rs ◄─── Checkout handoff
//! ├── shell.rs        ◄─── Line-oriented terminal front end
//! └── error.rs        ◄─── App error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use std::io::{BufRead, Write};

use tracing::info;
use tracing_subscriber::EnvFilter;

use error::AppResult;
use state::{Session, ShopConfig};

/// Runs one shopping session over the given input and output.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Session Startup                                   │
/// │                                                                         │
/// │  1. Configuration (already loaded by main) ────────────────────────────► │
/// │     • defaults → shop.toml → SHOP_* env → flags                         │
/// │                                                                         │
/// │  2. Create Session ────────────────────────────────────────────────────► │
/// │     • New session id                                                    │
/// │     • Empty CartStore at the configured tax rate                        │
/// │                                                                         │
/// │  3. Run Shell ─────────────────────────────────────────────────────────► │
/// │     • One command per line until quit / EOF                             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run<R: BufRead, W: Write>(config: ShopConfig, input: R, output: &mut W) -> AppResult<()> {
    info!(
        store = %config.store_name,
        tax_rate = %config.tax_rate(),
        "Starting shop session"
    );

    let mut session = Session::new(config);
    shell::run(&mut session, input, output)
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never interleave with shell output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shop=trace` - Show trace for shop crates only
/// - Default: `info,shop=debug`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shop=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
