//! Order types for the matching core.
//!
//! ## SSZ Serialization
//!
//! `Order` derives `SimpleSerialize` from ssz_rs. Enums are stored as raw `u8`
//! so the container stays fixed-size:
//! - `Side`: Buy = 0, Sell = 1
//! - `TimeInForce`: Gfd = 0, Fak = 1
//!
//! ## Prices
//!
//! Prices are integer ticks (the smallest tradable increment). There is no
//! floating point anywhere in matching.

use std::fmt;

use ssz_rs::prelude::*;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order (bid)
    #[default]
    Buy,
    /// Sell order (offer)
    Sell,
}

impl Side {
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Whether a resting order on this side at `resting_price` is willing to
    /// trade with an incoming order limited at `limit`.
    ///
    /// Resting bids cross an incoming sell when `resting_price >= limit`;
    /// resting offers cross an incoming buy when `resting_price <= limit`.
    /// Both bounds are inclusive.
    #[inline]
    pub fn crosses(self, resting_price: u64, limit: u64) -> bool {
        match self {
            Side::Buy => resting_price >= limit,
            Side::Sell => resting_price <= limit,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("BUY"),
            Side::Sell => f.write_str("SELL"),
        }
    }
}

// ============================================================================
// TimeInForce enum
// ============================================================================

/// What happens to volume left over once matching is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeInForce {
    /// Good-for-day: the unfilled remainder rests in the book
    #[default]
    Gfd,
    /// Fill-and-kill: the unfilled remainder is discarded
    Fak,
}

impl TimeInForce {
    pub fn to_u8(self) -> u8 {
        match self {
            TimeInForce::Gfd => 0,
            TimeInForce::Fak => 1,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(TimeInForce::Gfd),
            1 => Some(TimeInForce::Fak),
            _ => None,
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeInForce::Gfd => f.write_str("GFD"),
            TimeInForce::Fak => f.write_str("FAK"),
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order.
///
/// Identity, side, price and time-in-force are fixed at construction and only
/// readable afterwards. The remaining `volume` is reduced by matching.
///
/// ## SSZ Layout
///
/// Fixed-size container of 34 bytes:
/// id (8) + side (1) + time_in_force (1) + price (8) + quantity (8) + volume (8)
///
/// ## Example
///
/// ```
/// use matchbook::{Order, Side, TimeInForce};
///
/// let order = Order::new(1, Side::Buy, 109, 10, TimeInForce::Gfd);
/// assert_eq!(order.to_string(), "BUY 10@109");
/// assert_eq!(order.compact(), "(B 10)\t109");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Order {
    id: u64,
    side_raw: u8,
    time_in_force_raw: u8,
    price: u64,
    /// Volume at submission
    quantity: u64,
    /// Remaining unfilled volume
    volume: u64,
}

impl Order {
    pub fn new(id: u64, side: Side, price: u64, volume: u64, time_in_force: TimeInForce) -> Self {
        Self {
            id,
            side_raw: side.to_u8(),
            time_in_force_raw: time_in_force.to_u8(),
            price,
            quantity: volume,
            volume,
        }
    }

    /// Good-for-day limit order
    pub fn gfd(id: u64, side: Side, price: u64, volume: u64) -> Self {
        Self::new(id, side, price, volume, TimeInForce::Gfd)
    }

    /// Fill-and-kill limit order
    pub fn fak(id: u64, side: Side, price: u64, volume: u64) -> Self {
        Self::new(id, side, price, volume, TimeInForce::Fak)
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn side(&self) -> Side {
        Side::from_u8(self.side_raw).unwrap_or(Side::Buy)
    }

    #[inline]
    pub fn time_in_force(&self) -> TimeInForce {
        TimeInForce::from_u8(self.time_in_force_raw).unwrap_or(TimeInForce::Gfd)
    }

    #[inline]
    pub fn price(&self) -> u64 {
        self.price
    }

    /// Remaining unfilled volume
    #[inline]
    pub fn volume(&self) -> u64 {
        self.volume
    }

    /// Volume the order was submitted with
    #[inline]
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.volume == 0
    }

    pub fn filled_volume(&self) -> u64 {
        self.quantity.saturating_sub(self.volume)
    }

    /// Fill up to `qty` and return what was actually taken.
    pub(crate) fn fill(&mut self, qty: u64) -> u64 {
        let taken = qty.min(self.volume);
        self.volume -= taken;
        taken
    }

    /// One-line book row: bids on the left, offers indented to the right.
    pub fn compact(&self) -> String {
        match self.side() {
            Side::Buy => format!("(B {})\t{}", self.volume, self.price),
            Side::Sell => format!("\t{}\t(S {})", self.price, self.volume),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}@{}", self.side(), self.volume, self.price)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
