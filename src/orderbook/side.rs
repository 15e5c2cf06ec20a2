//! One side of the book: price levels ordered best first.
//!
//! ## Price Ordering
//!
//! Levels are kept in a `BTreeMap` keyed by price. Which end is "best"
//! depends on the side:
//!
//! - **Bids**: highest price first (last key)
//! - **Offers**: lowest price first (first key)

use std::collections::BTreeMap;

use log::trace;

use crate::orderbook::PriceLevel;
use crate::types::Side;

/// Resting orders of one side, grouped by price.
#[derive(Debug, Clone)]
pub struct BookSide {
    side: Side,
    levels: BTreeMap<u64, PriceLevel>,
    order_count: usize,
}

impl BookSide {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
            order_count: 0,
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of resting orders
    #[inline]
    pub fn order_count(&self) -> usize {
        self.order_count
    }

    /// Number of distinct prices
    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn total_volume(&self) -> u128 {
        self.levels.values().map(|level| level.total_volume).sum()
    }

    /// Best price on this side
    pub fn best_price(&self) -> Option<u64> {
        match self.side {
            Side::Buy => self.levels.keys().next_back().copied(),
            Side::Sell => self.levels.keys().next().copied(),
        }
    }

    /// Best price level, if any
    pub fn best_level(&self) -> Option<&PriceLevel> {
        match self.side {
            Side::Buy => self.levels.values().next_back(),
            Side::Sell => self.levels.values().next(),
        }
    }

    pub fn level(&self, price: u64) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    /// Levels best first
    pub fn levels(&self) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        match self.side {
            Side::Buy => Box::new(self.levels.values().rev()),
            Side::Sell => Box::new(self.levels.values()),
        }
    }

    /// Queue an order at the back of its price level.
    pub fn insert(&mut self, key: usize, price: u64, volume: u64) {
        let side = self.side;
        let level = self.levels.entry(price).or_insert_with(|| {
            trace!("{} level {} opened", side, price);
            PriceLevel::new(price)
        });
        level.push_back(key, volume);
        self.order_count += 1;
    }

    /// Apply a fill to the front order of the level at `price`.
    ///
    /// An exhausted front order is dequeued and its key returned; a level left
    /// empty is dropped.
    pub fn fill_front(&mut self, price: u64, filled: u64, exhausted: bool) -> Option<usize> {
        let level = self.levels.get_mut(&price)?;
        let removed = level.fill_front(filled, exhausted);
        if removed.is_some() {
            self.order_count -= 1;
        }
        if level.is_empty() {
            self.levels.remove(&price);
            trace!("{} level {} closed", self.side, price);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.levels.clear();
        self.order_count = 0;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
