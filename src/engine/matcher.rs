//! Matching loop.
//!
//! ## Algorithm
//!
//! ```text
//! while incoming has volume and the opposite best price crosses its limit:
//!     resting = oldest order at the opposite best price
//!     qty     = min(resting.volume, incoming.volume)
//!     trade qty at resting.price
//!     if resting is exhausted: pop it from its level
//! ```
//!
//! The same loop serves both directions: the opposite side and the crossing
//! test are chosen from the incoming side, nothing else differs.
//!
//! Every step exhausts either the resting order or the incoming one, so the
//! loop runs at most (resting orders consumed + 1) times.

use log::{error, info};

use crate::engine::events::{BookEvent, EventSink};
use crate::engine::policy::Disposition;
use crate::orderbook::OrderBook;
use crate::types::{Order, Trade};

/// Outcome of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub order_id: u64,

    /// Volume the order was submitted with
    pub quantity: u64,

    /// Executions in the order they happened
    pub trades: Vec<Trade>,

    pub disposition: Disposition,
}

impl MatchResult {
    pub fn is_fully_filled(&self) -> bool {
        self.disposition == Disposition::Filled
    }

    /// Sum of all trade quantities
    pub fn filled_volume(&self) -> u64 {
        self.trades.iter().map(|t| t.quantity).sum()
    }

    pub fn unfilled_volume(&self) -> u64 {
        self.disposition.unfilled_volume()
    }

    pub fn rested(&self) -> bool {
        matches!(self.disposition, Disposition::Rested { .. })
    }
}

/// Cross `incoming` against the opposite side of `book` until it is filled or
/// no resting price crosses its limit.
///
/// `incoming` is never in the book while this runs, so it cannot match itself.
pub(crate) fn cross<S>(book: &mut OrderBook, incoming: &mut Order, sink: &mut S) -> Vec<Trade>
where
    S: EventSink + ?Sized,
{
    let resting_side = incoming.side().opposite();
    let limit = incoming.price();
    let mut trades = Vec::new();

    while !incoming.is_filled() {
        let Some((price, key)) = book
            .side(resting_side)
            .best_level()
            .and_then(|level| level.front().map(|key| (level.price, key)))
        else {
            break;
        };

        if !resting_side.crosses(price, limit) {
            break;
        }

        let Some(resting) = book.orders.get_mut(key) else {
            error!("resting {resting_side} key {key} at {price} missing from storage");
            break;
        };

        let qty = resting.volume().min(incoming.volume());
        resting.fill(qty);
        incoming.fill(qty);
        let resting_id = resting.id();
        let exhausted = resting.is_filled();

        let trade = Trade::new(book.next_trade_id(), resting_id, incoming.id(), price, qty);
        if incoming.is_filled() {
            info!("[OrderBook] order {} fully traded @ {}", incoming.id(), price);
        } else {
            info!("[OrderBook] order {} partially traded {} @ {}", incoming.id(), qty, price);
        }
        sink.on_event(BookEvent::Trade(trade.clone()));
        trades.push(trade);

        let removed = book.side_mut(resting_side).fill_front(price, qty, exhausted);
        debug_assert_eq!(removed, exhausted.then_some(key), "level queue out of step with storage");
        if exhausted {
            book.release(resting_id, key);
            sink.on_event(BookEvent::RestingFilled {
                order_id: resting_id,
                side: resting_side,
                price,
            });
        }
    }

    trades
}

// ============================================================================
// Unit Tests
// ============================================================================
