//! Both ladders of a single security, and side dispatch.

use crate::error::{BookError, Result};
use crate::orderbook::{Asks, Bids, Ladder, PriceLevel};
use crate::types::{OrderRecord, Side};

/// Bid and ask ladders for one security.
///
/// Order identifiers are unique per side among resting orders; the same id
/// may rest on the bid and the ask at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstrumentBook {
    /// Buy orders, best (highest) price first
    pub bid: Ladder<Bids>,

    /// Sell orders, best (lowest) price first
    pub ask: Ladder<Asks>,
}

impl InstrumentBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Rest a new order on the ladder for its side
    pub fn add(&mut self, order: OrderRecord) -> Result<()> {
        match order.side() {
            Some(Side::Buy) => self.bid.insert(order),
            Some(Side::Sell) => self.ask.insert(order),
            None => Err(BookError::InvalidSide(order.side_raw)),
        }
    }

    /// Rewrite a resting order in place
    pub fn modify(&mut self, order: OrderRecord) -> Result<OrderRecord> {
        match order.side() {
            Some(Side::Buy) => self.bid.update(order),
            Some(Side::Sell) => self.ask.update(order),
            None => Err(BookError::InvalidSide(order.side_raw)),
        }
    }

    /// Remove a resting order
    pub fn delete(&mut self, order: &OrderRecord) -> Result<OrderRecord> {
        match order.side() {
            Some(Side::Buy) => self.bid.remove(order),
            Some(Side::Sell) => self.ask.remove(order),
            None => Err(BookError::InvalidSide(order.side_raw)),
        }
    }

    /// Number of occupied price levels on `side`
    pub fn depth(&self, side: Side) -> usize {
        match side {
            Side::Buy => self.bid.depth(),
            Side::Sell => self.ask.depth(),
        }
    }

    /// The `index`-th level on `side` in priority order
    pub fn level_at(&self, side: Side, index: usize) -> Option<&PriceLevel> {
        match side {
            Side::Buy => self.bid.level_at(index),
            Side::Sell => self.ask.level_at(index),
        }
    }

    /// Resting orders on both sides
    pub fn order_count(&self) -> usize {
        self.bid.order_count() + self.ask.order_count()
    }

    /// True if neither side has resting orders
    pub fn is_empty(&self) -> bool {
        self.bid.is_empty() && self.ask.is_empty()
    }
}
