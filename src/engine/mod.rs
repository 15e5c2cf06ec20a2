//! Matching engine.
//!
//! ## Matching Rules
//!
//! - **Buy orders** match against offers (lowest price first)
//! - **Sell orders** match against bids (highest price first)
//! - Equal prices match oldest first
//! - Every trade executes at the resting order's price
//! - A limit equal to the resting price crosses
//!
//! ## Residual Policy
//!
//! - **GFD**: unfilled volume rests on the book
//! - **FAK**: unfilled volume is discarded
//!
//! ## Example
//!
//! ```
//! use matchbook::{Order, OrderBook, Side};
//!
//! let mut book = OrderBook::new();
//! book.submit(Order::gfd(1, Side::Sell, 100, 10)).unwrap();
//!
//! let result = book.submit(Order::gfd(2, Side::Buy, 101, 4)).unwrap();
//!
//! assert!(result.is_fully_filled());
//! assert_eq!(result.trades.len(), 1);
//! assert_eq!(result.trades[0].price, 100);
//! ```

pub mod events;
pub mod matcher;
pub mod policy;

pub use events::{BookEvent, EventSink, LogSink, NullSink};
pub use matcher::MatchResult;
pub use policy::{dispose, Disposition};
