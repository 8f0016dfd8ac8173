//! Price level management for orders at the same price.
//!
//! ## Design
//!
//! A `PriceLevel` represents all resting orders at a single price point, in
//! strict arrival order (time priority):
//!
//! ```text
//! front (oldest) -> order2 -> order3 -> back (newest)
//! ```
//!
//! - New orders are appended at the back
//! - A Modify rewrites an order in its current slot, it never re-queues
//! - Any order can be removed; the remaining orders keep their relative order
//!
//! ## Lookup by identifier
//!
//! Identifiers normally arrive in ascending order, so a level's queue is also
//! sorted by id and can be binary searched. The level remembers whether that
//! still holds; the first out-of-order append switches it to a linear scan.

use std::collections::vec_deque::{self, VecDeque};

use crate::types::{OrderRecord, Price};

/// A price level containing the FIFO queue of orders at a single price.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLevel {
    /// Price for this level
    price: Price,

    /// Sum of resting volume at this level
    total_volume: u64,

    /// True while every id in the queue is greater than the one before it
    ids_ascending: bool,

    /// Orders in arrival order
    orders: VecDeque<OrderRecord>,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: Price) -> Self {
        Self {
            price,
            total_volume: 0,
            ids_ascending: true,
            orders: VecDeque::new(),
        }
    }

    /// Price of this level
    #[inline]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Aggregate resting volume
    #[inline]
    pub fn total_volume(&self) -> u64 {
        self.total_volume
    }

    /// Number of resting orders
    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Check if the price level is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Whether lookups can still binary search by id
    #[inline]
    pub fn ids_ascending(&self) -> bool {
        self.ids_ascending
    }

    /// Oldest order at this price
    #[inline]
    pub fn front(&self) -> Option<&OrderRecord> {
        self.orders.front()
    }

    /// Order at queue position `index` (0 = oldest)
    #[inline]
    pub fn get(&self, index: usize) -> Option<&OrderRecord> {
        self.orders.get(index)
    }

    /// Orders in time priority
    pub fn iter(&self) -> vec_deque::Iter<'_, OrderRecord> {
        self.orders.iter()
    }

    /// Add an order to the back of the queue
    pub fn push_back(&mut self, order: OrderRecord) {
        if let Some(last) = self.orders.back() {
            if order.id <= last.id {
                self.ids_ascending = false;
            }
        }
        self.total_volume = self.total_volume.saturating_add(order.volume);
        self.orders.push_back(order);
    }

    /// Queue position of the order with this id
    pub fn position(&self, order_id: u64) -> Option<usize> {
        if self.ids_ascending {
            self.orders
                .binary_search_by_key(&order_id, |o| o.id)
                .ok()
        } else {
            self.orders.iter().position(|o| o.id == order_id)
        }
    }

    /// Rewrite the order at `index` in place, returning the previous record
    ///
    /// The caller guarantees `replacement` has the same id as the slot.
    pub fn replace(&mut self, index: usize, replacement: OrderRecord) -> Option<OrderRecord> {
        let slot = self.orders.get_mut(index)?;
        self.total_volume = self
            .total_volume
            .saturating_sub(slot.volume)
            .saturating_add(replacement.volume);
        Some(std::mem::replace(slot, replacement))
    }

    /// Remove the order at `index`, keeping the others in arrival order
    pub fn remove(&mut self, index: usize) -> Option<OrderRecord> {
        let order = self.orders.remove(index)?;
        self.total_volume = self.total_volume.saturating_sub(order.volume);
        Some(order)
    }

    /// Rewrite the resting order with `order.id` in place.
    ///
    /// Returns the previous record, or hands `order` back if no order with
    /// that id rests at this level.
    pub fn update_order(&mut self, order: OrderRecord) -> Result<OrderRecord, OrderRecord> {
        let Some(index) = self.position(order.id) else {
            return Err(order);
        };
        let slot = &mut self.orders[index];
        self.total_volume = self
            .total_volume
            .saturating_sub(slot.volume)
            .saturating_add(order.volume);
        Ok(std::mem::replace(slot, order))
    }

    /// Remove the resting order with this id
    pub fn remove_order(&mut self, order_id: u64) -> Option<OrderRecord> {
        let index = self.position(order_id)?;
        self.remove(index)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
