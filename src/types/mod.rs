//! Core data types.
//!
//! - [`Order`]: a limit order
//! - [`Side`]: Buy or Sell
//! - [`TimeInForce`]: GFD or FAK
//! - [`Trade`]: one execution between a resting and an incoming order
//!
//! Both structs implement SSZ serialization for deterministic encoding.

mod order;
mod trade;

pub use order::{Order, Side, TimeInForce};
pub use trade::Trade;
