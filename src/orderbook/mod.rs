//! Order book storage.
//!
//! ## Components
//!
//! - [`PriceLevel`]: FIFO queue of orders at a single price
//! - [`BookSide`]: price levels of one side, best first
//! - [`OrderBook`]: both sides, slab storage and the `submit` entry point
//! - [`BookSnapshot`]: consistent copy of the resting state
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Rest order | O(log P) |
//! | Best bid/offer | O(log P) |
//! | One match step | O(log P) |
//! | Remove exhausted head | O(1) + O(log P) if the level empties |
//! | Lookup by id | O(1) |
//!
//! P is the number of distinct prices on a side.

pub mod book;
pub mod level;
pub mod side;
pub mod snapshot;

pub use book::{BookStats, OrderBook};
pub use level::PriceLevel;
pub use side::BookSide;
pub use snapshot::{BookSnapshot, LevelSummary};
