//! # Shop CLI Entry Point
//!
//! Interactive storefront cart over stdin/stdout.
//!
//! ## Usage
//! ```bash
//! # Defaults (8% tax, "$")
//! shop-cli
//!
//! # Custom config file and tax override
//! shop-cli --config ./shop.toml --tax-rate 8.25
//!
//! # Scripted session
//! printf 'add 1 10.00 2 20%% Shirt\ncheckout\n' | shop-cli
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration (file, environment, flags)
//! 3. Run the shell until `quit` or end of input

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use shop_cli_lib::state::ShopConfig;
use shop_core::TaxRate;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "Storefront cart shell")]
struct Cli {
    /// Path to shop.toml (default: platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tax rate as a percentage, e.g. 8.25 (overrides config and SHOP_TAX_RATE)
    #[arg(short, long, value_parser = parse_tax_rate)]
    tax_rate: Option<TaxRate>,
}

fn parse_tax_rate(s: &str) -> Result<TaxRate, String> {
    TaxRate::parse_percentage(s).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    shop_cli_lib::init_tracing();

    let cli = Cli::parse();

    let mut config = ShopConfig::load_or_default(cli.config);
    if let Some(rate) = cli.tax_rate {
        info!(tax_rate = %rate, "Tax rate set from command line");
        config.tax_rate_bps = rate.bps();
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    match shop_cli_lib::run(config, stdin.lock(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Shop session failed");
            ExitCode::FAILURE
        }
    }
}
