//! Price level: every resting order at one price.
//!
//! ## Queue Structure
//!
//! ```text
//! front (oldest) -> key2 -> key3 -> back (newest)
//! ```
//!
//! The queue holds slab keys; the orders themselves live in the book's slab.
//! New orders are appended at the back and matching consumes from the front,
//! so arrival order is time priority without ever re-sorting.

use std::collections::VecDeque;

/// Time-ordered queue of resting orders sharing a price.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    pub price: u64,

    /// Sum of remaining volume of every queued order. Several orders near
    /// `u64::MAX` can share a price, so the sum is kept in `u128`.
    pub total_volume: u128,

    queue: VecDeque<usize>,
}

impl PriceLevel {
    pub fn new(price: u64) -> Self {
        Self {
            price,
            total_volume: 0,
            queue: VecDeque::new(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of orders at this price
    #[inline]
    pub fn order_count(&self) -> usize {
        self.queue.len()
    }

    /// Slab key of the oldest order, the next to be matched
    #[inline]
    pub fn front(&self) -> Option<usize> {
        self.queue.front().copied()
    }

    /// Slab keys oldest first
    pub fn keys(&self) -> impl Iterator<Item = usize> + '_ {
        self.queue.iter().copied()
    }

    /// Append an order behind everything already at this price.
    pub fn push_back(&mut self, key: usize, volume: u64) {
        self.queue.push_back(key);
        self.total_volume += u128::from(volume);
    }

    /// Account for a fill against the front order.
    ///
    /// When `exhausted` the front order is dequeued and its key returned.
    pub fn fill_front(&mut self, filled: u64, exhausted: bool) -> Option<usize> {
        self.total_volume -= u128::from(filled);
        if exhausted {
            self.queue.pop_front()
        } else {
            None
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_level_new() {
        let level = PriceLevel::new(109);

        assert_eq!(level.price, 109);
        assert_eq!(level.total_volume, 0);
        assert_eq!(level.order_count(), 0);
        assert!(level.front().is_none());
        assert!(level.is_empty());
    }

    #[test]
    fn test_push_keeps_arrival_order() {
        let mut level = PriceLevel::new(108);

        level.push_back(7, 10);
        level.push_back(2, 5);
        level.push_back(4, 1);

        assert_eq!(level.order_count(), 3);
        assert_eq!(level.total_volume, 16);
        assert_eq!(level.front(), Some(7));
        assert_eq!(level.keys().collect::<Vec<_>>(), vec![7, 2, 4]);
    }

    #[test]
    fn test_partial_fill_keeps_front() {
        let mut level = PriceLevel::new(107);
        level.push_back(0, 10);
        level.push_back(1, 10);

        assert_eq!(level.fill_front(9, false), None);

        assert_eq!(level.front(), Some(0));
        assert_eq!(level.total_volume, 11);
        assert_eq!(level.order_count(), 2);
    }

    #[test]
    fn test_exhausting_fill_pops_front() {
        let mut level = PriceLevel::new(107);
        level.push_back(0, 10);
        level.push_back(1, 10);

        assert_eq!(level.fill_front(10, true), Some(0));
        assert_eq!(level.front(), Some(1));
        assert_eq!(level.total_volume, 10);

        assert_eq!(level.fill_front(10, true), Some(1));
        assert!(level.is_empty());
        assert_eq!(level.total_volume, 0);
    }

    #[test]
    fn test_total_volume_beyond_u64() {
        let mut level = PriceLevel::new(100);
        level.push_back(0, u64::MAX);
        level.push_back(1, 5);

        assert_eq!(level.total_volume, u128::from(u64::MAX) + 5);

        assert_eq!(level.fill_front(u64::MAX, true), Some(0));
        assert_eq!(level.total_volume, 5);
    }
}
