//! Notifications emitted while a submission is processed.
//!
//! The book pushes a [`BookEvent`] into an [`EventSink`] for every trade and
//! every change to the set of resting orders. For one submission the order is:
//!
//! 1. per matching step: `Trade`, then `RestingFilled` if that step exhausted
//!    the resting order
//! 2. at most one of `Rested` or `Discarded` for the incoming remainder

use log::info;

use crate::types::{Side, Trade};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookEvent {
    /// One matching step executed
    Trade(Trade),

    /// A resting order was fully consumed and left the book
    RestingFilled { order_id: u64, side: Side, price: u64 },

    /// A good-for-day remainder joined the book
    Rested {
        order_id: u64,
        side: Side,
        price: u64,
        volume: u64,
    },

    /// A fill-and-kill remainder was dropped
    Discarded { order_id: u64, side: Side, volume: u64 },
}

/// Consumer of book notifications.
pub trait EventSink {
    fn on_event(&mut self, event: BookEvent);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn on_event(&mut self, event: BookEvent) {
        (**self).on_event(event)
    }
}

/// Collects events in emission order.
impl EventSink for Vec<BookEvent> {
    fn on_event(&mut self, event: BookEvent) {
        self.push(event);
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    #[inline]
    fn on_event(&mut self, _event: BookEvent) {}
}

/// Writes every event to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn on_event(&mut self, event: BookEvent) {
        match event {
            BookEvent::Trade(trade) => info!("[trade #{}] {}", trade.id, trade),
            BookEvent::RestingFilled { order_id, side, price } => {
                info!("[book] {side} order {order_id} @ {price} fully traded")
            }
            BookEvent::Rested {
                order_id,
                side,
                price,
                volume,
            } => info!("[book] {side} order {order_id} resting {volume}@{price}"),
            BookEvent::Discarded {
                order_id,
                side,
                volume,
            } => info!("[book] {side} order {order_id} discarded {volume} unfilled"),
        }
    }
}
