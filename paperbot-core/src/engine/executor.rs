//! Order executor — applies one order to the portfolio.
//!
//! One state transition per order, chosen by the current holding and the
//! order's side/size. Any combination not covered here is an unrecoverable
//! contract violation and aborts the run.

use crate::domain::{Order, OrderSide, Portfolio, Position, Size};
use crate::engine::error::SimError;

/// Apply `order` to `portfolio` at the instrument's current `price`.
///
/// Returns the commission charged, which the caller accumulates into the
/// run's fee total. Commission is a fixed fraction of the transaction's
/// notional on every branch; on a short close it is embedded in the payoff
/// term rather than charged separately.
pub fn execute(
    order: &Order,
    price: f64,
    portfolio: &mut Portfolio,
    commission_rate: f64,
) -> Result<f64, SimError> {
    let quantity = portfolio.quantity(&order.symbol);

    match order.side {
        OrderSide::Buy => buy(order, price, portfolio, commission_rate),
        OrderSide::Sell if quantity > 0.0 => sell_long(order, price, portfolio, commission_rate),
        OrderSide::Sell if quantity < 0.0 => close_short(order, price, portfolio, commission_rate),
        OrderSide::Sell => open_short(order, price, portfolio, commission_rate),
    }
}

/// Buy: spend `notional` cash, receive `(notional - fee) / price` shares.
///
/// The position is *set*, not added to: reissuing a buy while already
/// holding replaces the position and discards the prior share count
/// (see DESIGN.md for the rationale).
fn buy(
    order: &Order,
    price: f64,
    portfolio: &mut Portfolio,
    commission_rate: f64,
) -> Result<f64, SimError> {
    let notional = match order.size {
        Size::All => portfolio.cash,
        Size::Notional(n) if n > 0.0 => n,
        Size::Notional(_) => {
            return Err(SimError::invalid(
                &order.symbol,
                "buy requires a positive notional",
            ))
        }
    };
    let fee = notional * commission_rate;
    let shares = (notional - fee) / price;
    portfolio.cash -= notional;
    portfolio
        .positions
        .insert(order.symbol.clone(), Position::long(shares));
    Ok(fee)
}

/// Regular exit of a long position. Always liquidates the full quantity.
fn sell_long(
    order: &Order,
    price: f64,
    portfolio: &mut Portfolio,
    commission_rate: f64,
) -> Result<f64, SimError> {
    let quantity = portfolio.quantity(&order.symbol);
    let notional = match order.size {
        Size::All => quantity * price,
        Size::Notional(n) => n,
    };
    let fee = notional * commission_rate;
    portfolio.cash += notional - fee;
    portfolio
        .positions
        .insert(order.symbol.clone(), Position::long(0.0));
    Ok(fee)
}

/// Open a short on a flat position. Intent is carried by a negative
/// notional; a plain sell against a flat position is a contract violation.
fn open_short(
    order: &Order,
    price: f64,
    portfolio: &mut Portfolio,
    commission_rate: f64,
) -> Result<f64, SimError> {
    let notional = match order.size {
        Size::Notional(n) if n < 0.0 => n.abs(),
        _ => {
            return Err(SimError::invalid(
                &order.symbol,
                "sell with no open position (short intent requires a negative notional)",
            ))
        }
    };
    let fee = notional * commission_rate;
    portfolio.cash -= notional;
    portfolio.positions.insert(
        order.symbol.clone(),
        Position::short(notional / price, price),
    );
    Ok(fee)
}

/// Close an open short in full. Partial closes are not supported.
///
/// payoff = (cost_basis - price) * qty + qty * cost_basis * (1 - rate):
/// the second term returns the cash debited at open net of the close
/// commission, the first marks the open-to-close price move.
fn close_short(
    order: &Order,
    price: f64,
    portfolio: &mut Portfolio,
    commission_rate: f64,
) -> Result<f64, SimError> {
    if order.size != Size::All {
        return Err(SimError::invalid(
            &order.symbol,
            "a short can only be closed in full (explicit size not supported)",
        ));
    }
    let position = portfolio
        .get_position(&order.symbol)
        .ok_or_else(|| SimError::invalid(&order.symbol, "no open short"))?;
    let quantity = position.quantity.abs();
    let cost_basis = position
        .cost_basis
        .ok_or_else(|| SimError::invalid(&order.symbol, "open short has no cost basis"))?;

    let payoff =
        (cost_basis - price) * quantity + quantity * cost_basis * (1.0 - commission_rate);
    let fee = quantity * cost_basis * commission_rate;
    portfolio.cash += payoff;
    portfolio
        .positions
        .insert(order.symbol.clone(), Position::long(0.0));
    Ok(fee)
}
