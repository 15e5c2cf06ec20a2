//! # matchbook
//!
//! Matching core of a single-instrument limit order book.
//!
//! ## Architecture
//!
//! - **Types**: `Order`, `Trade`, `Side`, `TimeInForce`
//! - **OrderBook**: price levels of FIFO queues over slab storage
//! - **Engine**: the matching loop, GFD/FAK residual policy, event sinks
//!
//! ## Design Principles
//!
//! 1. **Price-time priority**: best price first, then oldest first
//! 2. **Resting price wins**: every trade executes at the resting order's price
//! 3. **Integer prices**: ticks as `u64`, no floating point
//! 4. **Synchronous**: one submission runs to completion before the next;
//!    `submit` takes `&mut self`
//!
//! ## Example
//!
//! ```
//! use matchbook::{Order, OrderBook, Side};
//!
//! let mut book = OrderBook::new();
//! for (id, price) in [(0, 109), (1, 108), (2, 107), (3, 106)] {
//!     book.submit(Order::gfd(id, Side::Buy, price, 10)).unwrap();
//! }
//!
//! let result = book.submit(Order::gfd(4, Side::Sell, 100, 29)).unwrap();
//!
//! let fills: Vec<(u64, u64)> = result.trades.iter().map(|t| (t.quantity, t.price)).collect();
//! assert_eq!(fills, vec![(10, 109), (10, 108), (9, 107)]);
//! assert_eq!(book.best_bid(), Some(107));
//! ```

// ============================================================================
// Module declarations
// ============================================================================

pub mod config;
pub mod engine;
pub mod error;
pub mod orderbook;
pub mod types;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::BookConfig;
pub use engine::{BookEvent, Disposition, EventSink, LogSink, MatchResult, NullSink};
pub use error::{BookError, Result};
pub use orderbook::{BookSnapshot, BookStats, LevelSummary, OrderBook};
pub use types::{Order, Side, TimeInForce, Trade};
