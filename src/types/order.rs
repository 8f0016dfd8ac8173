//! Order event/state record.
//!
//! ## Raw Codes
//!
//! The enumerated fields of an [`OrderRecord`] are stored as raw `u8` codes,
//! exactly as they arrive from a feed, with typed accessors that return
//! `None` for codes outside the known set. The book decodes them at dispatch
//! time and rejects unknown codes with `InvalidAction` / `InvalidSide`.
//!
//! | Field | Codes |
//! |-------|-------|
//! | action | Add = 1, Modify = 2, Delete = 3 |
//! | side | Buy = 0, Sell = 1 |
//! | constraint | Limit = 0, Market = 1 |

use crate::types::Price;

// ============================================================================
// Action enum
// ============================================================================

/// What an event does to the book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Rest a new order at the back of its price level
    Add,
    /// Rewrite a resting order in place, keeping its queue position
    Modify,
    /// Remove a resting order
    Delete,
}

impl Action {
    /// Convert to the raw feed code
    pub fn to_u8(self) -> u8 {
        match self {
            Action::Add => 1,
            Action::Modify => 2,
            Action::Delete => 3,
        }
    }

    /// Convert from the raw feed code
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Action::Add),
            2 => Some(Action::Modify),
            3 => Some(Action::Delete),
            _ => None,
        }
    }
}

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
///
/// Represented as u8 on the wire:
/// - Buy = 0
/// - Sell = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order, rests on the bid ladder
    #[default]
    Buy,
    /// Sell order, rests on the ask ladder
    Sell,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

// ============================================================================
// Constraint enum
// ============================================================================

/// Order constraint.
///
/// Stored and encoded with every record but never inspected by placement:
/// market orders rest in the ladder exactly like limit orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Constraint {
    /// Limit order
    #[default]
    Limit,
    /// Market order
    Market,
}

impl Constraint {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Constraint::Limit => 0,
            Constraint::Market => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Constraint::Limit),
            1 => Some(Constraint::Market),
            _ => None,
        }
    }
}

// ============================================================================
// OrderRecord struct
// ============================================================================

/// One order event, and the state of a resting order once it is in the book.
///
/// ## Example
///
/// ```
/// use ladder_book::types::{Action, OrderRecord, Side};
///
/// let order = OrderRecord::add(1, Side::Buy, "US30303M1027", 100.1, 10_000);
/// assert_eq!(order.action(), Some(Action::Add));
/// assert_eq!(order.side(), Some(Side::Buy));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderRecord {
    /// Order identifier, expected to ascend by arrival per security and side
    pub id: u64,

    /// Action code (1=Add, 2=Modify, 3=Delete)
    pub action_raw: u8,

    /// Side code (0=Buy, 1=Sell)
    pub side_raw: u8,

    /// Constraint code (0=Limit, 1=Market)
    pub constraint_raw: u8,

    /// Security identifier, e.g. an ISIN
    pub security: String,

    /// Level price
    pub price: f32,

    /// Resting quantity
    pub volume: u64,
}

impl OrderRecord {
    /// Create a record from typed fields
    ///
    /// # Arguments
    ///
    /// * `id` - Order identifier
    /// * `action` - Add, Modify or Delete
    /// * `side` - Buy or Sell
    /// * `constraint` - Limit or Market (carried, not enforced)
    /// * `security` - Security identifier
    /// * `price` - Level price
    /// * `volume` - Quantity
    pub fn new(
        id: u64,
        action: Action,
        side: Side,
        constraint: Constraint,
        security: impl Into<String>,
        price: f32,
        volume: u64,
    ) -> Self {
        Self {
            id,
            action_raw: action.to_u8(),
            side_raw: side.to_u8(),
            constraint_raw: constraint.to_u8(),
            security: security.into(),
            price,
            volume,
        }
    }

    /// Limit Add event
    pub fn add(id: u64, side: Side, security: impl Into<String>, price: f32, volume: u64) -> Self {
        Self::new(id, Action::Add, side, Constraint::Limit, security, price, volume)
    }

    /// Limit Modify event
    pub fn modify(id: u64, side: Side, security: impl Into<String>, price: f32, volume: u64) -> Self {
        Self::new(id, Action::Modify, side, Constraint::Limit, security, price, volume)
    }

    /// Limit Delete event
    pub fn delete(id: u64, side: Side, security: impl Into<String>, price: f32, volume: u64) -> Self {
        Self::new(id, Action::Delete, side, Constraint::Limit, security, price, volume)
    }

    /// Replace the constraint, keeping everything else
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint_raw = constraint.to_u8();
        self
    }

    /// Decoded action, `None` for an unknown code
    pub fn action(&self) -> Option<Action> {
        Action::from_u8(self.action_raw)
    }

    /// Decoded side, `None` for an unknown code
    pub fn side(&self) -> Option<Side> {
        Side::from_u8(self.side_raw)
    }

    /// Decoded constraint, `None` for an unknown code
    pub fn constraint(&self) -> Option<Constraint> {
        Constraint::from_u8(self.constraint_raw)
    }

    /// The price as a ladder key
    #[inline]
    pub fn price_key(&self) -> Price {
        Price::new(self.price)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
