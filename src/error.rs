//! Error types for the order book.
//!
//! Partial fills and fill-and-kill discards are normal matching outcomes and
//! never surface here. Only submissions that break the order contract, and
//! encoding failures while hashing book state, are errors.

use thiserror::Error;

/// Order book errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("order {order_id} submitted with zero volume")]
    ZeroVolume { order_id: u64 },

    #[error("order {order_id} is already resting in the book")]
    DuplicateOrderId { order_id: u64 },

    #[error("failed to encode book state: {0}")]
    Encoding(String),
}

impl From<ssz_rs::SerializeError> for BookError {
    fn from(err: ssz_rs::SerializeError) -> Self {
        BookError::Encoding(format!("{err:?}"))
    }
}

pub type Result<T> = std::result::Result<T, BookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            BookError::ZeroVolume { order_id: 7 }.to_string(),
            "order 7 submitted with zero volume"
        );
        assert_eq!(
            BookError::DuplicateOrderId { order_id: 3 }.to_string(),
            "order 3 is already resting in the book"
        );
    }
}
