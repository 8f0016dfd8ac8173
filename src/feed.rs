//! Built-in sample feed.
//!
//! Two securities receive the same book through different arrival orders:
//! `US30303M1027` in descending bid price order, `US02079K1079` in ascending
//! bid price order with the asks shuffled. Both end with identical ladders:
//!
//! ```text
//! bid 100.0: [500, 5000]   ask 100.1: [10000]
//! bid  99.9: [2000]        ask 100.5: [7000]
//!                          ask 100.8: [500]
//! ```

use crate::types::{Action, Constraint, OrderRecord, Side};

/// Security fed in descending bid price order
pub const FORWARD_SECURITY: &str = "US30303M1027";

/// Security fed in ascending bid price order
pub const REVERSE_SECURITY: &str = "US02079K1079";

/// A security the sample feed never mentions
pub const ABSENT_SECURITY: &str = "UK01234X5789";

fn event(id: u64, action: Action, side: Side, security: &str, price: f32, volume: u64) -> OrderRecord {
    OrderRecord::new(id, action, side, Constraint::Market, security, price, volume)
}

/// The sample event sequence, in feed order
pub fn sample_feed() -> Vec<OrderRecord> {
    use Action::{Add, Delete, Modify};
    use Side::{Buy, Sell};

    let fwd = FORWARD_SECURITY;
    let rev = REVERSE_SECURITY;

    vec![
        event(1, Add, Buy, fwd, 100.1, 10_000),
        event(2, Add, Buy, fwd, 100.0, 5_000),
        event(3, Add, Buy, fwd, 100.0, 5_000),
        event(4, Add, Buy, fwd, 99.9, 2_000),
        event(2, Modify, Buy, fwd, 100.0, 500),
        event(1, Delete, Buy, fwd, 100.1, 10_000),
        event(7, Add, Sell, fwd, 100.1, 10_000),
        event(8, Add, Sell, fwd, 100.5, 7_000),
        event(9, Add, Sell, fwd, 100.8, 500),
        event(11, Add, Buy, rev, 99.9, 2_000),
        event(12, Add, Buy, rev, 100.0, 5_000),
        event(13, Add, Buy, rev, 100.0, 5_000),
        event(14, Add, Buy, rev, 100.1, 10_000),
        event(12, Modify, Buy, rev, 100.0, 500),
        event(14, Delete, Buy, rev, 100.1, 10_000),
        event(15, Add, Sell, rev, 100.1, 10_000),
        event(16, Add, Sell, rev, 100.8, 500),
        event(17, Add, Sell, rev, 100.5, 7_000),
    ]
}
