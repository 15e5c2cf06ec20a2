//! The order book: resting storage plus the submission entry point.
//!
//! ## Architecture
//!
//! - **Slab**: pre-allocated storage for resting orders
//! - **BookSide**: `BTreeMap` of price levels per side for best price lookup
//! - **HashMap**: order id to slab key, for lookups by id
//!
//! ## Invariants between submissions
//!
//! - every resting order has volume > 0
//! - bids are served highest price first, offers lowest price first, and
//!   equal prices oldest first
//! - the book is never crossed: best bid < best offer, or a side is empty
//!
//! ## Example
//!
//! ```
//! use matchbook::{Order, OrderBook, Side};
//!
//! let mut book = OrderBook::with_capacity(1_000);
//!
//! book.submit(Order::gfd(1, Side::Buy, 109, 10)).unwrap();
//! book.submit(Order::gfd(2, Side::Sell, 120, 5)).unwrap();
//!
//! assert_eq!(book.best_bid(), Some(109));
//! assert_eq!(book.best_offer(), Some(120));
//! assert_eq!(book.spread(), Some(11));
//! ```

use std::collections::HashMap;

use log::{debug, info};
use slab::Slab;

use crate::config::BookConfig;
use crate::engine::matcher::{self, MatchResult};
use crate::engine::policy::{self, Disposition};
use crate::engine::{BookEvent, EventSink, NullSink};
use crate::error::{BookError, Result};
use crate::orderbook::{BookSide, BookSnapshot};
use crate::types::{Order, Side};

/// Running counters since the book was created or last cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookStats {
    /// Submissions accepted for matching
    pub orders_accepted: u64,
    /// Submissions rejected before matching
    pub orders_rejected: u64,
    pub trades: u64,
    /// Sum of trade quantities; wider than a single volume so repeated
    /// near-`u64::MAX` fills cannot overflow it
    pub traded_volume: u128,
    /// Volume dropped from FAK remainders
    pub discarded_volume: u128,
}

/// Single-instrument limit order book
#[derive(Debug)]
pub struct OrderBook {
    pub(crate) orders: Slab<Order>,
    bids: BookSide,
    offers: BookSide,
    index: HashMap<u64, usize>,
    next_trade_id: u64,
    stats: BookStats,
    config: BookConfig,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    pub fn new() -> Self {
        Self::with_config(BookConfig::default())
    }

    /// Create a book with `order_capacity` resting slots pre-allocated
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self::with_config(BookConfig::default().with_order_capacity(order_capacity))
    }

    pub fn with_config(config: BookConfig) -> Self {
        Self {
            orders: Slab::with_capacity(config.order_capacity),
            bids: BookSide::new(Side::Buy),
            offers: BookSide::new(Side::Sell),
            index: HashMap::with_capacity(config.order_capacity),
            next_trade_id: 1,
            stats: BookStats::default(),
            config,
        }
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Match `order` against the book, then rest or discard any remainder
    /// according to its time-in-force.
    ///
    /// # Errors
    ///
    /// - [`BookError::ZeroVolume`] if the order carries no volume
    /// - [`BookError::DuplicateOrderId`] if an order with the same id is
    ///   resting and duplicates are rejected
    ///
    /// A rejected order leaves the book untouched.
    pub fn submit(&mut self, order: Order) -> Result<MatchResult> {
        self.submit_with(order, &mut NullSink)
    }

    /// Like [`submit`](Self::submit), also streaming every [`BookEvent`]
    /// into `sink` as it happens.
    ///
    /// ```
    /// use matchbook::{BookEvent, Order, OrderBook, Side};
    ///
    /// let mut book = OrderBook::new();
    /// let mut events: Vec<BookEvent> = Vec::new();
    ///
    /// book.submit_with(Order::fak(1, Side::Sell, 120, 5), &mut events).unwrap();
    ///
    /// assert!(matches!(events[..], [BookEvent::Discarded { volume: 5, .. }]));
    /// assert!(book.is_empty());
    /// ```
    pub fn submit_with<S>(&mut self, order: Order, sink: &mut S) -> Result<MatchResult>
    where
        S: EventSink + ?Sized,
    {
        if let Err(err) = self.validate(&order) {
            self.stats.orders_rejected += 1;
            debug!("[OrderBook] rejected order {}: {}", order.id(), err);
            return Err(err);
        }
        self.stats.orders_accepted += 1;
        debug!(
            "[OrderBook] received order {}: {} {}",
            order.id(),
            order,
            order.time_in_force()
        );

        let order_id = order.id();
        let quantity = order.quantity();
        let mut incoming = order;

        let trades = matcher::cross(self, &mut incoming, sink);
        self.stats.trades += trades.len() as u64;
        self.stats.traded_volume += u128::from(incoming.filled_volume());

        let disposition = policy::dispose(incoming.time_in_force(), incoming.volume());
        match disposition {
            Disposition::Filled => {}
            Disposition::Rested { volume } => {
                let side = incoming.side();
                let price = incoming.price();
                self.rest(incoming);
                debug!("[OrderBook] order {order_id} resting {side} {volume}@{price}");
                sink.on_event(BookEvent::Rested {
                    order_id,
                    side,
                    price,
                    volume,
                });
            }
            Disposition::Discarded { volume } => {
                self.stats.discarded_volume += u128::from(volume);
                info!("[OrderBook] FAK order {order_id} discarded {volume} unfilled");
                sink.on_event(BookEvent::Discarded {
                    order_id,
                    side: incoming.side(),
                    volume,
                });
            }
        }

        debug_assert!(!self.is_crossed(), "book crossed after order {order_id}");

        Ok(MatchResult {
            order_id,
            quantity,
            trades,
            disposition,
        })
    }

    fn validate(&self, order: &Order) -> Result<()> {
        if order.volume() == 0 {
            return Err(BookError::ZeroVolume {
                order_id: order.id(),
            });
        }
        if self.config.reject_duplicate_ids && self.index.contains_key(&order.id()) {
            return Err(BookError::DuplicateOrderId {
                order_id: order.id(),
            });
        }
        Ok(())
    }

    /// Queue a remainder at the back of its price level.
    fn rest(&mut self, order: Order) {
        let id = order.id();
        let price = order.price();
        let volume = order.volume();
        let side = order.side();

        let key = self.orders.insert(order);
        self.index.insert(id, key);
        self.side_mut(side).insert(key, price, volume);
    }

    /// Drop an exhausted resting order from storage. The caller has already
    /// dequeued it from its level.
    pub(crate) fn release(&mut self, order_id: u64, key: usize) {
        self.orders.try_remove(key);
        // With duplicate ids allowed the index may point at a newer order
        if self.index.get(&order_id) == Some(&key) {
            self.index.remove(&order_id);
        }
    }

    pub(crate) fn next_trade_id(&mut self) -> u64 {
        let id = self.next_trade_id;
        self.next_trade_id += 1;
        id
    }

    // ========================================================================
    // Sides
    // ========================================================================

    pub fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.offers,
        }
    }

    pub(crate) fn side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.offers,
        }
    }

    pub fn bids(&self) -> &BookSide {
        &self.bids
    }

    pub fn offers(&self) -> &BookSide {
        &self.offers
    }

    /// Resting orders of `side`, best first
    pub fn resting(&self, side: Side) -> impl Iterator<Item = &Order> + '_ {
        self.side(side)
            .levels()
            .flat_map(move |level| level.keys().filter_map(move |key| self.orders.get(key)))
    }

    // ========================================================================
    // Size
    // ========================================================================

    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bids.order_count()
    }

    #[inline]
    pub fn offer_count(&self) -> usize {
        self.offers.order_count()
    }

    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.level_count()
    }

    #[inline]
    pub fn offer_levels(&self) -> usize {
        self.offers.level_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    // ========================================================================
    // Best Bid/Offer
    // ========================================================================

    /// Highest resting buy price
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.best_price()
    }

    /// Lowest resting sell price
    #[inline]
    pub fn best_offer(&self) -> Option<u64> {
        self.offers.best_price()
    }

    /// best_offer - best_bid, when both sides have orders
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_offer()) {
            (Some(bid), Some(offer)) if offer >= bid => Some(offer - bid),
            _ => None,
        }
    }

    /// True if best bid >= best offer. Never true between submissions.
    pub fn is_crossed(&self) -> bool {
        matches!(
            (self.best_bid(), self.best_offer()),
            (Some(bid), Some(offer)) if bid >= offer
        )
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Resting order by id
    pub fn get(&self, order_id: u64) -> Option<&Order> {
        self.index
            .get(&order_id)
            .and_then(|&key| self.orders.get(key))
    }

    #[inline]
    pub fn contains_order(&self, order_id: u64) -> bool {
        self.index.contains_key(&order_id)
    }

    pub fn stats(&self) -> BookStats {
        self.stats
    }

    /// Consistent copy of the resting state, best first on both sides.
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot::capture(self)
    }

    /// SHA-256 over the SSZ encoding of every resting order in priority order.
    pub fn state_root(&self) -> Result<[u8; 32]> {
        self.snapshot().state_root()
    }

    /// Remove every resting order and reset counters
    pub fn clear(&mut self) {
        self.orders.clear();
        self.bids.clear();
        self.offers.clear();
        self.index.clear();
        self.next_trade_id = 1;
        self.stats = BookStats::default();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimeInForce;

    fn buy(id: u64, price: u64, volume: u64) -> Order {
        Order::gfd(id, Side::Buy, price, volume)
    }

    fn sell(id: u64, price: u64, volume: u64) -> Order {
        Order::gfd(id, Side::Sell, price, volume)
    }

    #[test]
    fn test_book_new() {
        let book = OrderBook::new();

        assert!(book.is_empty());
        assert_eq!(book.order_count(), 0);
        assert!(book.best_bid().is_none());
        assert!(book.best_offer().is_none());
        assert!(book.spread().is_none());
        assert!(!book.is_crossed());
    }

    #[test]
    fn test_book_with_capacity() {
        let book = OrderBook::with_capacity(10_000);
        assert!(book.capacity() >= 10_000);
        assert_eq!(book.config().order_capacity, 10_000);
    }

    #[test]
    fn test_gfd_rests_when_nothing_crosses() {
        let mut book = OrderBook::new();

        let result = book.submit(buy(0, 109, 10)).unwrap();

        assert!(result.trades.is_empty());
        assert_eq!(result.disposition, Disposition::Rested { volume: 10 });
        assert!(result.rested());
        assert_eq!(book.bid_count(), 1);
        assert_eq!(book.best_bid(), Some(109));
        assert!(book.contains_order(0));
    }

    #[test]
    fn test_zero_volume_rejected() {
        let mut book = OrderBook::new();

        let err = book.submit(buy(1, 109, 0)).unwrap_err();

        assert_eq!(err, BookError::ZeroVolume { order_id: 1 });
        assert!(book.is_empty());
        assert_eq!(book.stats().orders_rejected, 1);
        assert_eq!(book.stats().orders_accepted, 0);
    }

    #[test]
    fn test_duplicate_resting_id_rejected() {
        let mut book = OrderBook::new();
        book.submit(buy(1, 109, 10)).unwrap();

        let err = book.submit(sell(1, 120, 5)).unwrap_err();

        assert_eq!(err, BookError::DuplicateOrderId { order_id: 1 });
        assert_eq!(book.order_count(), 1);
        assert!(book.best_offer().is_none());
    }

    #[test]
    fn test_id_reusable_after_fill() {
        let mut book = OrderBook::new();
        book.submit(buy(1, 109, 10)).unwrap();
        book.submit(sell(2, 109, 10)).unwrap();

        assert!(!book.contains_order(1));
        assert!(book.submit(buy(1, 100, 1)).is_ok());
    }

    #[test]
    fn test_duplicates_allowed_when_configured() {
        let config = BookConfig::default().with_reject_duplicate_ids(false);
        let mut book = OrderBook::with_config(config);

        book.submit(buy(1, 109, 10)).unwrap();
        book.submit(buy(1, 108, 10)).unwrap();
        assert_eq!(book.bid_count(), 2);

        // Exhausting the older order must not unindex the newer one
        book.submit(sell(2, 109, 10)).unwrap();
        assert_eq!(book.get(1).map(|o| o.price()), Some(108));
    }

    #[test]
    fn test_buy_crosses_offers() {
        let mut book = OrderBook::new();
        book.submit(sell(0, 101, 5)).unwrap();
        book.submit(sell(1, 100, 5)).unwrap();

        let result = book.submit(buy(2, 102, 7)).unwrap();

        let fills: Vec<(u64, u64)> = result.trades.iter().map(|t| (t.price, t.quantity)).collect();
        assert_eq!(fills, vec![(100, 5), (101, 2)]);
        assert!(result.is_fully_filled());
        assert_eq!(book.best_offer(), Some(101));
        assert_eq!(book.get(0).map(|o| o.volume()), Some(3));
    }

    #[test]
    fn test_fak_remainder_never_rests() {
        let mut book = OrderBook::new();
        book.submit(sell(0, 100, 5)).unwrap();

        let result = book
            .submit(Order::new(1, Side::Buy, 100, 8, TimeInForce::Fak))
            .unwrap();

        assert_eq!(result.filled_volume(), 5);
        assert_eq!(result.disposition, Disposition::Discarded { volume: 3 });
        assert!(book.is_empty());
        assert!(!book.contains_order(1));
        assert_eq!(book.stats().discarded_volume, 3);
    }

    #[test]
    fn test_resting_iterates_best_first() {
        let mut book = OrderBook::new();
        book.submit(buy(0, 107, 1)).unwrap();
        book.submit(buy(1, 109, 1)).unwrap();
        book.submit(buy(2, 107, 1)).unwrap();

        let ids: Vec<u64> = book.resting(Side::Buy).map(|o| o.id()).collect();
        assert_eq!(ids, vec![1, 0, 2]);
    }

    #[test]
    fn test_stats_accumulate() {
        let mut book = OrderBook::new();
        book.submit(buy(0, 109, 10)).unwrap();
        book.submit(buy(1, 108, 10)).unwrap();
        book.submit(sell(2, 100, 15)).unwrap();

        let stats = book.stats();
        assert_eq!(stats.orders_accepted, 3);
        assert_eq!(stats.trades, 2);
        assert_eq!(stats.traded_volume, 15);
    }

    #[test]
    fn test_stats_survive_max_volume_trades() {
        let mut book = OrderBook::new();
        book.submit(buy(0, 100, u64::MAX)).unwrap();
        book.submit(sell(1, 100, u64::MAX)).unwrap();
        book.submit(buy(2, 100, 1)).unwrap();
        book.submit(sell(3, 100, 1)).unwrap();
        book.submit(Order::fak(4, Side::Sell, 100, u64::MAX)).unwrap();
        book.submit(Order::fak(5, Side::Sell, 100, u64::MAX)).unwrap();

        let stats = book.stats();
        assert_eq!(stats.trades, 2);
        assert_eq!(stats.traded_volume, u128::from(u64::MAX) + 1);
        assert_eq!(stats.discarded_volume, 2 * u128::from(u64::MAX));
        assert!(book.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut book = OrderBook::new();
        book.submit(buy(0, 109, 10)).unwrap();
        book.submit(sell(1, 120, 10)).unwrap();

        book.clear();

        assert!(book.is_empty());
        assert_eq!(book.bid_count(), 0);
        assert_eq!(book.offer_count(), 0);
        assert!(book.best_bid().is_none());
        assert_eq!(book.stats(), BookStats::default());
    }
}
