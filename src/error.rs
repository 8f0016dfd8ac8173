//! Status taxonomy for the order book.
//!
//! Every variant is an expected, data-driven condition caused by malformed or
//! out-of-order feed input. None of them aborts the process: they are returned
//! to the caller, which decides whether to log, skip or translate them into an
//! exit code via [`BookError::code`].

use thiserror::Error;

/// Result type alias for order book operations.
pub type Result<T> = std::result::Result<T, BookError>;

/// Errors surfaced by [`OrderBook`](crate::OrderBook) and its ladders.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookError {
    /// The event's action code is not Add, Modify or Delete
    #[error("invalid order action: {0}")]
    InvalidAction(u8),

    /// The event's side code is not Buy or Sell
    #[error("invalid order side: {0}")]
    InvalidSide(u8),

    /// No instrument book exists for this security
    #[error("unknown security: {0}")]
    UnknownSecurity(String),

    /// No resting level at the event's price
    #[error("no price level for security {security} at price {price}")]
    PriceLevelNotFound { security: String, price: f32 },

    /// The price level exists but does not hold this order
    #[error("order {order_id} not found for security {security} at price {price}")]
    OrderIdNotFound {
        security: String,
        price: f32,
        order_id: u64,
    },

    /// An Add reused an identifier that is still resting on the same side
    #[error("order {order_id} is already resting for security {security}")]
    DuplicateOrderId { security: String, order_id: u64 },
}

impl BookError {
    /// Small integer status code, `0` being reserved for success.
    pub fn code(&self) -> i32 {
        match self {
            BookError::InvalidAction(_) => 1,
            BookError::InvalidSide(_) => 2,
            BookError::UnknownSecurity(_) => 3,
            BookError::PriceLevelNotFound { .. } => 4,
            BookError::OrderIdNotFound { .. } => 5,
            BookError::DuplicateOrderId { .. } => 6,
        }
    }

    /// True for the two lookup misses a Modify or Delete can produce.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            BookError::PriceLevelNotFound { .. } | BookError::OrderIdNotFound { .. }
        )
    }
}
