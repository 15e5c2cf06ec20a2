//! Trade type representing one matching step between a resting and an
//! incoming order.

use std::fmt;

use ssz_rs::prelude::*;

/// A single execution against one resting order.
///
/// ## Terminology
///
/// - **Resting**: the order that was already in the book
/// - **Incoming**: the order being submitted (the aggressor)
///
/// ## Price
///
/// The trade always executes at the resting order's price, so the aggressor
/// gets any price improvement.
///
/// ## Example
///
/// ```
/// use matchbook::Trade;
///
/// let trade = Trade::new(1, 0, 6, 109, 10);
/// assert_eq!(trade.to_string(), "10@109 (resting 0, incoming 6)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Trade {
    /// Book-local trade sequence, starting at 1
    pub id: u64,

    pub resting_order_id: u64,

    pub incoming_order_id: u64,

    /// Execution price (always the resting order's price)
    pub price: u64,

    pub quantity: u64,
}

impl Trade {
    pub fn new(
        id: u64,
        resting_order_id: u64,
        incoming_order_id: u64,
        price: u64,
        quantity: u64,
    ) -> Self {
        Self {
            id,
            resting_order_id,
            incoming_order_id,
            price,
            quantity,
        }
    }

    /// Price times quantity, in tick-units
    pub fn notional(&self) -> u128 {
        (self.price as u128) * (self.quantity as u128)
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{} (resting {}, incoming {})",
            self.quantity, self.price, self.resting_order_id, self.incoming_order_id
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
