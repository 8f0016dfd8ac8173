//! One side of an instrument's book.
//!
//! ## Price Ordering
//!
//! A [`Ladder`] is parameterized by a [`LevelOrder`] that fixes both the side
//! and the key its `BTreeMap` sorts on:
//!
//! - [`Bids`]: keyed by `Reverse<Price>`, iterates high-to-low (best bid first)
//! - [`Asks`]: keyed by `Price`, iterates low-to-high (best ask first)
//!
//! Iteration order of the map is therefore priority order, and `level_at(0)`
//! is always the top of book.
//!
//! ## Lookups
//!
//! Update and remove first locate the level by the event's price
//! (`PriceLevelNotFound` if absent), then the order inside that level by id
//! (`OrderIdNotFound` if absent). A failed call never mutates the ladder.
//!
//! The ladder also keeps an `id -> price` index of resting orders, used to
//! reject an Add whose id is already resting on this side.
//!
//! ## Example
//!
//! ```
//! use ladder_book::orderbook::{Bids, Ladder};
//! use ladder_book::types::{OrderRecord, Price, Side};
//!
//! let mut bids: Ladder<Bids> = Ladder::new();
//! bids.insert(OrderRecord::add(1, Side::Buy, "US30303M1027", 99.9, 2_000)).unwrap();
//! bids.insert(OrderRecord::add(2, Side::Buy, "US30303M1027", 100.0, 5_000)).unwrap();
//!
//! assert_eq!(bids.depth(), 2);
//! assert_eq!(bids.best_price(), Some(Price::new(100.0)));
//! ```

use std::cmp::Reverse;
use std::collections::{btree_map, BTreeMap, HashMap};
use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use crate::error::{BookError, Result};
use crate::orderbook::PriceLevel;
use crate::types::{OrderRecord, Price, Side};

// ============================================================================
// Side ordering
// ============================================================================

/// Sort order of one side's price levels.
pub trait LevelOrder {
    /// `BTreeMap` key whose ascending order is this side's priority order
    type Key: Ord + Copy + fmt::Debug;

    /// Side whose orders rest on this ladder
    const SIDE: Side;

    /// Map a price to its key
    fn key(price: Price) -> Self::Key;
}

/// Bid ordering: highest price first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bids;

/// Ask ordering: lowest price first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Asks;

impl LevelOrder for Bids {
    type Key = Reverse<Price>;
    const SIDE: Side = Side::Buy;

    #[inline]
    fn key(price: Price) -> Self::Key {
        Reverse(price)
    }
}

impl LevelOrder for Asks {
    type Key = Price;
    const SIDE: Side = Side::Sell;

    #[inline]
    fn key(price: Price) -> Self::Key {
        price
    }
}

// ============================================================================
// Ladder
// ============================================================================

/// Price-ordered, time-ordered resting orders for one side of one instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct Ladder<O: LevelOrder> {
    /// Price levels in priority order
    levels: BTreeMap<O::Key, PriceLevel>,

    /// Resting order id to the price it rests at
    order_index: HashMap<u64, Price>,

    _order: PhantomData<O>,
}

impl<O: LevelOrder> Default for Ladder<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: LevelOrder> Ladder<O> {
    /// Create an empty ladder
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
            order_index: HashMap::new(),
            _order: PhantomData,
        }
    }

    /// Create an empty ladder sized for `order_capacity` resting orders
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            levels: BTreeMap::new(),
            order_index: HashMap::with_capacity(order_capacity),
            _order: PhantomData,
        }
    }

    /// Side served by this ladder
    #[inline]
    pub fn side(&self) -> Side {
        O::SIDE
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Append an order to the back of its price level, creating the level if
    /// needed.
    ///
    /// # Errors
    ///
    /// `DuplicateOrderId` if an order with the same id is already resting on
    /// this side. The ladder is left unchanged.
    pub fn insert(&mut self, order: OrderRecord) -> Result<()> {
        if self.order_index.contains_key(&order.id) {
            debug!(
                security = %order.security,
                order_id = order.id,
                side = ?O::SIDE,
                "rejecting add for an id that is already resting"
            );
            return Err(BookError::DuplicateOrderId {
                security: order.security,
                order_id: order.id,
            });
        }

        let price = order.price_key();
        self.order_index.insert(order.id, price);
        self.levels
            .entry(O::key(price))
            .or_insert_with(|| PriceLevel::new(price))
            .push_back(order);
        Ok(())
    }

    /// Rewrite a resting order in place, keeping its queue position.
    ///
    /// The order is found at the level for `order.price`; price therefore
    /// never changes through an update.
    ///
    /// # Returns
    ///
    /// The record that was replaced
    pub fn update(&mut self, order: OrderRecord) -> Result<OrderRecord> {
        let key = O::key(order.price_key());
        let level = self
            .levels
            .get_mut(&key)
            .ok_or_else(|| price_level_not_found(&order))?;
        level
            .update_order(order)
            .map_err(|order| order_id_not_found(&order))
    }

    /// Remove a resting order, dropping its level if it was the last one.
    ///
    /// # Returns
    ///
    /// The removed record
    pub fn remove(&mut self, order: &OrderRecord) -> Result<OrderRecord> {
        let key = O::key(order.price_key());
        let level = self
            .levels
            .get_mut(&key)
            .ok_or_else(|| price_level_not_found(order))?;
        let removed = level
            .remove_order(order.id)
            .ok_or_else(|| order_id_not_found(order))?;

        if level.is_empty() {
            self.levels.remove(&key);
        }
        self.order_index.remove(&removed.id);
        Ok(removed)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of distinct occupied price levels
    #[inline]
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Number of resting orders across all levels
    #[inline]
    pub fn order_count(&self) -> usize {
        self.order_index.len()
    }

    /// True if no orders rest on this side
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The `index`-th level in priority order (0 = best)
    pub fn level_at(&self, index: usize) -> Option<&PriceLevel> {
        self.levels.values().nth(index)
    }

    /// The best level
    #[inline]
    pub fn best_level(&self) -> Option<&PriceLevel> {
        self.levels.values().next()
    }

    /// The best price
    #[inline]
    pub fn best_price(&self) -> Option<Price> {
        self.best_level().map(PriceLevel::price)
    }

    /// Levels in priority order
    pub fn levels(&self) -> btree_map::Values<'_, O::Key, PriceLevel> {
        self.levels.values()
    }

    /// Check if an order with this id is resting
    #[inline]
    pub fn contains_order(&self, order_id: u64) -> bool {
        self.order_index.contains_key(&order_id)
    }

    /// Price a resting order sits at
    #[inline]
    pub fn price_of(&self, order_id: u64) -> Option<Price> {
        self.order_index.get(&order_id).copied()
    }
}

fn price_level_not_found(order: &OrderRecord) -> BookError {
    debug!(
        security = %order.security,
        price = order.price,
        order_id = order.id,
        "no price level for event"
    );
    BookError::PriceLevelNotFound {
        security: order.security.clone(),
        price: order.price,
    }
}

fn order_id_not_found(order: &OrderRecord) -> BookError {
    debug!(
        security = %order.security,
        price = order.price,
        order_id = order.id,
        "no resting order with this id at the event's price"
    );
    BookError::OrderIdNotFound {
        security: order.security.clone(),
        price: order.price,
        order_id: order.id,
    }
}

// ============================================================================
// LevelView
// ============================================================================

/// Read-only view over the orders resting at one price level.
///
/// An out-of-range level or unknown security yields an empty view rather
/// than an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelView<'a> {
    level: Option<&'a PriceLevel>,
}

impl<'a> LevelView<'a> {
    /// A view with no orders
    pub fn empty() -> Self {
        Self { level: None }
    }

    /// The underlying level, if any
    #[inline]
    pub fn level(&self) -> Option<&'a PriceLevel> {
        self.level
    }

    /// True if the view holds no orders
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.level.map_or(true, PriceLevel::is_empty)
    }

    /// Number of orders in the view
    #[inline]
    pub fn len(&self) -> usize {
        self.level.map_or(0, PriceLevel::len)
    }

    /// Level price, `None` for an empty view
    #[inline]
    pub fn price(&self) -> Option<Price> {
        self.level.map(PriceLevel::price)
    }

    /// Aggregate volume, 0 for an empty view
    #[inline]
    pub fn total_volume(&self) -> u64 {
        self.level.map_or(0, PriceLevel::total_volume)
    }

    /// Order at queue position `index`
    pub fn get(&self, index: usize) -> Option<&'a OrderRecord> {
        self.level.and_then(|level| level.get(index))
    }

    /// Orders in time priority
    pub fn iter(&self) -> impl Iterator<Item = &'a OrderRecord> + 'a {
        self.level.into_iter().flat_map(PriceLevel::iter)
    }
}

impl<'a> From<Option<&'a PriceLevel>> for LevelView<'a> {
    fn from(level: Option<&'a PriceLevel>) -> Self {
        Self { level }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: &str = "US30303M1027";

    fn buy(id: u64, price: f32, volume: u64) -> OrderRecord {
        OrderRecord::add(id, Side::Buy, SEC, price, volume)
    }

    fn sell(id: u64, price: f32, volume: u64) -> OrderRecord {
        OrderRecord::add(id, Side::Sell, SEC, price, volume)
    }

    fn prices<O: LevelOrder>(ladder: &Ladder<O>) -> Vec<f32> {
        ladder.levels().map(|l| l.price().value()).collect()
    }

    #[test]
    fn test_ladder_new() {
        let ladder: Ladder<Bids> = Ladder::new();

        assert!(ladder.is_empty());
        assert_eq!(ladder.depth(), 0);
        assert_eq!(ladder.side(), Side::Buy);
        assert!(ladder.best_price().is_none());
        assert!(ladder.level_at(0).is_none());
    }

    #[test]
    fn test_bid_ladder_descends() {
        let mut bids: Ladder<Bids> = Ladder::with_capacity(8);
        bids.insert(buy(1, 99.9, 2_000)).unwrap();
        bids.insert(buy(2, 100.1, 10_000)).unwrap();
        bids.insert(buy(3, 100.0, 5_000)).unwrap();

        assert_eq!(prices(&bids), vec![100.1, 100.0, 99.9]);
        assert_eq!(bids.best_price(), Some(Price::new(100.1)));
    }

    #[test]
    fn test_ask_ladder_ascends() {
        let mut asks: Ladder<Asks> = Ladder::new();
        asks.insert(sell(7, 100.5, 7_000)).unwrap();
        asks.insert(sell(8, 100.8, 500)).unwrap();
        asks.insert(sell(9, 100.1, 10_000)).unwrap();

        assert_eq!(asks.side(), Side::Sell);
        assert_eq!(prices(&asks), vec![100.1, 100.5, 100.8]);
        assert_eq!(asks.best_price(), Some(Price::new(100.1)));
    }

    #[test]
    fn test_insert_same_price_is_fifo() {
        let mut bids: Ladder<Bids> = Ladder::new();
        bids.insert(buy(2, 100.0, 5_000)).unwrap();
        bids.insert(buy(3, 100.0, 4_000)).unwrap();

        assert_eq!(bids.depth(), 1);
        assert_eq!(bids.order_count(), 2);
        let level = bids.level_at(0).unwrap();
        let ids: Vec<u64> = level.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(level.total_volume(), 9_000);
    }

    #[test]
    fn test_insert_duplicate_id_rejected() {
        let mut bids: Ladder<Bids> = Ladder::new();
        bids.insert(buy(1, 100.0, 5_000)).unwrap();
        let before = bids.clone();

        let err = bids.insert(buy(1, 99.0, 10)).unwrap_err();

        assert_eq!(
            err,
            BookError::DuplicateOrderId { security: SEC.to_string(), order_id: 1 }
        );
        assert_eq!(bids, before);
    }

    #[test]
    fn test_update_keeps_position() {
        let mut bids: Ladder<Bids> = Ladder::new();
        bids.insert(buy(2, 100.0, 5_000)).unwrap();
        bids.insert(buy(3, 100.0, 5_000)).unwrap();

        let previous = bids
            .update(OrderRecord::modify(2, Side::Buy, SEC, 100.0, 500))
            .unwrap();

        assert_eq!(previous.volume, 5_000);
        let level = bids.level_at(0).unwrap();
        let volumes: Vec<u64> = level.iter().map(|o| o.volume).collect();
        assert_eq!(volumes, vec![500, 5_000]);
        assert_eq!(level.total_volume(), 5_500);
    }

    #[test]
    fn test_update_missing_level() {
        let mut bids: Ladder<Bids> = Ladder::new();
        bids.insert(buy(2, 100.0, 5_000)).unwrap();

        let err = bids
            .update(OrderRecord::modify(2, Side::Buy, SEC, 100.5, 500))
            .unwrap_err();

        assert!(matches!(err, BookError::PriceLevelNotFound { .. }));
        assert_eq!(bids.level_at(0).unwrap().front().unwrap().volume, 5_000);
    }

    #[test]
    fn test_update_missing_order() {
        let mut bids: Ladder<Bids> = Ladder::new();
        bids.insert(buy(2, 100.0, 5_000)).unwrap();

        let err = bids
            .update(OrderRecord::modify(4, Side::Buy, SEC, 100.0, 500))
            .unwrap_err();

        assert_eq!(
            err,
            BookError::OrderIdNotFound { security: SEC.to_string(), price: 100.0, order_id: 4 }
        );
    }

    #[test]
    fn test_remove_drops_empty_level() {
        let mut bids: Ladder<Bids> = Ladder::new();
        bids.insert(buy(1, 100.1, 10_000)).unwrap();
        bids.insert(buy(2, 100.0, 5_000)).unwrap();

        let removed = bids
            .remove(&OrderRecord::delete(1, Side::Buy, SEC, 100.1, 10_000))
            .unwrap();

        assert_eq!(removed.id, 1);
        assert_eq!(bids.depth(), 1);
        assert_eq!(bids.best_price(), Some(Price::new(100.0)));
        assert!(!bids.contains_order(1));
    }

    #[test]
    fn test_remove_keeps_non_empty_level() {
        let mut asks: Ladder<Asks> = Ladder::new();
        asks.insert(sell(1, 100.5, 100)).unwrap();
        asks.insert(sell(2, 100.5, 200)).unwrap();

        asks.remove(&OrderRecord::delete(1, Side::Sell, SEC, 100.5, 100)).unwrap();

        assert_eq!(asks.depth(), 1);
        assert_eq!(asks.best_level().unwrap().front().unwrap().id, 2);
        assert_eq!(asks.best_level().unwrap().total_volume(), 200);
    }

    #[test]
    fn test_remove_wrong_price_leaves_ladder_unchanged() {
        let mut asks: Ladder<Asks> = Ladder::new();
        asks.insert(sell(1, 100.5, 100)).unwrap();
        asks.insert(sell(2, 100.8, 200)).unwrap();
        let before = asks.clone();

        // Order 1 exists, but not at 100.8
        let err = asks
            .remove(&OrderRecord::delete(1, Side::Sell, SEC, 100.8, 100))
            .unwrap_err();
        assert!(matches!(err, BookError::OrderIdNotFound { order_id: 1, .. }));

        let err = asks
            .remove(&OrderRecord::delete(1, Side::Sell, SEC, 101.0, 100))
            .unwrap_err();
        assert!(matches!(err, BookError::PriceLevelNotFound { .. }));

        assert_eq!(asks, before);
    }

    #[test]
    fn test_id_reusable_after_remove() {
        let mut bids: Ladder<Bids> = Ladder::new();
        bids.insert(buy(1, 100.0, 10)).unwrap();
        bids.remove(&OrderRecord::delete(1, Side::Buy, SEC, 100.0, 10)).unwrap();

        assert!(bids.insert(buy(1, 99.0, 20)).is_ok());
        assert_eq!(bids.price_of(1), Some(Price::new(99.0)));
    }

    #[test]
    fn test_level_view() {
        let mut bids: Ladder<Bids> = Ladder::new();
        bids.insert(buy(1, 100.0, 10)).unwrap();
        bids.insert(buy(2, 100.0, 20)).unwrap();

        let view = LevelView::from(bids.level_at(0));
        assert!(!view.is_empty());
        assert_eq!(view.len(), 2);
        assert_eq!(view.price(), Some(Price::new(100.0)));
        assert_eq!(view.total_volume(), 30);
        assert_eq!(view.get(1).map(|o| o.id), Some(2));
        assert_eq!(view.iter().map(|o| o.volume).sum::<u64>(), 30);

        let empty = LevelView::from(bids.level_at(5));
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
        assert_eq!(empty.price(), None);
        assert_eq!(empty.iter().count(), 0);
    }
}
