//! Point-in-time copy of the resting book.
//!
//! Snapshots are only taken between submissions (`OrderBook::snapshot` needs
//! `&self` while matching holds `&mut self`), so they always satisfy the book
//! invariants.
//!
//! ## State Root
//!
//! The state root is SHA-256 over the SSZ encoding of every resting order,
//! bids then offers, each best first. Replaying the same submissions into a
//! fresh book yields the same root.

use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::orderbook::{BookSide, OrderBook};
use crate::types::{Order, Side};

/// Aggregate of one price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSummary {
    pub price: u64,
    /// Remaining volume at this price, summed without overflow
    pub volume: u128,
    pub order_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookSnapshot {
    /// Resting buys, best first
    pub bids: Vec<Order>,
    /// Resting sells, best first
    pub offers: Vec<Order>,
    pub bid_depth: Vec<LevelSummary>,
    pub offer_depth: Vec<LevelSummary>,
}

impl BookSnapshot {
    pub(crate) fn capture(book: &OrderBook) -> Self {
        Self {
            bids: book.resting(Side::Buy).cloned().collect(),
            offers: book.resting(Side::Sell).cloned().collect(),
            bid_depth: depth(book.bids()),
            offer_depth: depth(book.offers()),
        }
    }

    pub fn best_bid(&self) -> Option<u64> {
        self.bids.first().map(Order::price)
    }

    pub fn best_offer(&self) -> Option<u64> {
        self.offers.first().map(Order::price)
    }

    pub fn is_crossed(&self) -> bool {
        matches!(
            (self.best_bid(), self.best_offer()),
            (Some(bid), Some(offer)) if bid >= offer
        )
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.offers.is_empty()
    }

    /// Whether any resting order carries `order_id`
    pub fn contains(&self, order_id: u64) -> bool {
        self.bids
            .iter()
            .chain(self.offers.iter())
            .any(|o| o.id() == order_id)
    }

    pub fn total_volume(&self, side: Side) -> u128 {
        let orders = match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.offers,
        };
        orders.iter().map(|o| u128::from(o.volume())).sum()
    }

    pub fn state_root(&self) -> Result<[u8; 32]> {
        let mut hasher = Sha256::new();
        for (tag, orders) in [(b"bids", &self.bids), (b"offr", &self.offers)] {
            hasher.update(tag);
            hasher.update((orders.len() as u64).to_le_bytes());
            for order in orders {
                hasher.update(ssz_rs::serialize(order)?);
            }
        }

        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        Ok(root)
    }

    pub fn state_root_hex(&self) -> Result<String> {
        Ok(hex::encode(self.state_root()?))
    }
}

fn depth(side: &BookSide) -> Vec<LevelSummary> {
    side.levels()
        .map(|level| LevelSummary {
            price: level.price,
            volume: level.total_volume,
            order_count: level.order_count(),
        })
        .collect()
}

// ============================================================================
// Unit Tests
// ============================================================================
