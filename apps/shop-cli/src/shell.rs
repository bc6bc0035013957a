//! # Shell
//!
//! Line-oriented front end over the session commands.
//!
//! ## Commands
//! ```text
//! show                                     render the cart
//! add <id> <price> <qty> [N%] <name...>    add a product (or replace its quantity)
//! qty <id> <text>                          type into the quantity field
//! inc <id> / dec <id>                      the + / − controls
//! rm <id>                                  the trash icon
//! clear                                    "Clear Cart"
//! checkout                                 "Proceed to Checkout" (prints JSON)
//! coupon <code>                            accepted, not applied
//! help / quit
//! ```
//!
//! A failing command prints `error [CODE]: message` and the shell keeps
//! reading. Only I/O errors on the terminal itself end the loop early.

use std::io::{BufRead, Write};
use std::str::FromStr;

use shop_core::{DiscountPercent, ItemId, Money, Quantity};
use tracing::{debug, info};

use crate::commands::cart::{self, AddToCartRequest, CartView};
use crate::commands::checkout;
use crate::error::{AppError, AppResult};
use crate::state::Session;

const HELP: &str = "\
Commands:
  show                                   Show the cart
  add <id> <price> <qty> [N%] <name...>  Add a product
  qty <id> <text>                        Set a quantity (below 1 removes)
  inc <id>                               Add one unit
  dec <id>                               Remove one unit
  rm <id>                                Remove a line
  clear                                  Clear the cart
  checkout                               Proceed to checkout
  coupon <code>                          Apply a coupon code
  help                                   Show this help
  quit                                   Leave the shop";

/// One parsed shell line.
#[derive(Debug, Clone)]
pub enum ShellCommand {
    Show,
    Add(AddToCartRequest),
    Quantity { id: ItemId, raw: String },
    Increment(ItemId),
    Decrement(ItemId),
    Remove(ItemId),
    Clear,
    Checkout,
    Coupon(String),
    Help,
    Quit,
    /// Blank line
    Nothing,
}

impl FromStr for ShellCommand {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "" => ShellCommand::Nothing,
            "show" | "cart" => ShellCommand::Show,
            "add" => ShellCommand::Add(parse_add(rest)?),
            "qty" | "set" => {
                let (id, raw) = match rest.split_once(char::is_whitespace) {
                    Some((id, raw)) => (id, raw.trim()),
                    None => (rest, ""),
                };
                if id.is_empty() {
                    return Err(AppError::Usage("qty <id> <text>"));
                }
                ShellCommand::Quantity {
                    id: id.parse()?,
                    raw: raw.to_string(),
                }
            }
            "inc" | "+" => ShellCommand::Increment(parse_id(rest, "inc <id>")?),
            "dec" | "-" => ShellCommand::Decrement(parse_id(rest, "dec <id>")?),
            "rm" | "remove" => ShellCommand::Remove(parse_id(rest, "rm <id>")?),
            "clear" => ShellCommand::Clear,
            "checkout" => ShellCommand::Checkout,
            "coupon" => {
                if rest.is_empty() {
                    return Err(AppError::Usage("coupon <code>"));
                }
                ShellCommand::Coupon(rest.to_string())
            }
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            _ => return Err(AppError::UnknownCommand(verb.to_string())),
        };

        Ok(command)
    }
}

fn parse_id(rest: &str, usage: &'static str) -> AppResult<ItemId> {
    let mut tokens = rest.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(id), None) => Ok(id.parse()?),
        _ => Err(AppError::Usage(usage)),
    }
}

/// `<id> <price> <qty> [N%] <name...>`
fn parse_add(rest: &str) -> AppResult<AddToCartRequest> {
    const USAGE: &str = "add <id> <price> <qty> [N%] <name...>";

    let mut tokens = rest.split_whitespace().peekable();
    let (Some(id), Some(price), Some(qty)) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(AppError::Usage(USAGE));
    };

    let unit_price: Money = price.parse()?;
    let quantity: Quantity = qty.parse()?;

    let discount = match tokens.peek() {
        Some(token) if token.ends_with('%') => {
            let parsed = DiscountPercent::from_str(token)?;
            tokens.next();
            Some(parsed)
        }
        _ => None,
    };

    let name = tokens.collect::<Vec<_>>().join(" ");
    if name.is_empty() {
        return Err(AppError::Usage(USAGE));
    }

    Ok(AddToCartRequest {
        id: id.parse()?,
        name,
        unit_price,
        quantity,
        discount,
        image: None,
    })
}

/// Whether the shell keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs one command against the session, writing its output.
pub fn execute<W: Write>(
    session: &mut Session,
    command: ShellCommand,
    out: &mut W,
) -> AppResult<Flow> {
    match command {
        ShellCommand::Nothing => {}
        ShellCommand::Show => render_cart(&cart::get_cart(session), out)?,
        ShellCommand::Add(request) => render_cart(&cart::add_to_cart(session, request)?, out)?,
        ShellCommand::Quantity { id, raw } => {
            render_cart(&cart::update_cart_item(session, id, &raw), out)?
        }
        ShellCommand::Increment(id) => render_cart(&cart::increment_item(session, id), out)?,
        ShellCommand::Decrement(id) => render_cart(&cart::decrement_item(session, id), out)?,
        ShellCommand::Remove(id) => render_cart(&cart::remove_from_cart(session, id), out)?,
        ShellCommand::Clear => render_cart(&cart::clear_cart(session), out)?,
        ShellCommand::Checkout => writeln!(out, "{}", checkout::checkout_json(session)?)?,
        ShellCommand::Coupon(code) => {
            debug!(code = %code, "coupon command");
            writeln!(out, "Coupon codes are not supported yet; '{}' was not applied.", code)?;
        }
        ShellCommand::Help => writeln!(out, "{}", HELP)?,
        ShellCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

/// Reads commands until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, out: &mut W) -> AppResult<()> {
    info!(session_id = %session.id(), "Shell session started");
    writeln!(
        out,
        "Welcome to {}. Type 'help' for commands.",
        session.config().store_name
    )?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let flow = line
            .parse::<ShellCommand>()
            .and_then(|command| execute(session, command, out));

        match flow {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(AppError::Io(e)) => return Err(AppError::Io(e)),
            Err(e) => {
                debug!(error = %e, "Command failed");
                writeln!(out, "error [{}]: {}", e.code().as_str(), e)?;
            }
        }
    }

    info!(
        session_id = %session.id(),
        lines = session.cart().len(),
        "Shell session ended"
    );
    writeln!(out, "Goodbye!")?;
    Ok(())
}

/// Writes the cart page as plain text.
pub fn render_cart<W: Write>(view: &CartView, out: &mut W) -> AppResult<()> {
    if view.is_empty {
        writeln!(out, "Your Cart is Empty")?;
        writeln!(out, "Add some products to get started!")?;
        return Ok(());
    }

    writeln!(out, "Shopping Cart")?;
    writeln!(out, "Cart Items ({})", view.line_count)?;
    for line in &view.lines {
        let discount = line
            .discount_label
            .as_deref()
            .map(|label| format!(" {}", label))
            .unwrap_or_default();
        writeln!(
            out,
            "  [{}] {}  {}{}  x{}  {}",
            line.id, line.name, line.each, discount, line.quantity, line.line_total
        )?;
    }

    let summary = &view.summary;
    writeln!(out, "Order Summary")?;
    writeln!(out, "  {}: {}", summary.items_label, summary.subtotal)?;
    if let Some(discount) = &summary.discount {
        writeln!(out, "  Discount: {}", discount)?;
    }
    writeln!(out, "  {}: {}", summary.tax_label, summary.tax)?;
    writeln!(out, "  Shipping: {}", summary.shipping)?;
    writeln!(out, "  Total: {}", summary.total)?;

    Ok(())
}
