//! Security-keyed order book.
//!
//! ## Architecture
//!
//! - **HashMap**: security identifier to [`InstrumentBook`], created on first
//!   sight of a security and kept for the life of the book
//! - **Ladders**: each instrument holds a bid and an ask [`Ladder`]
//!
//! ## Processing
//!
//! [`OrderBook::process`] routes each event by action (Add/Modify/Delete) and
//! then by side. Malformed or out-of-order events are expected: they come back
//! as a [`BookError`] and leave the book exactly as it was.
//!
//! ## Queries
//!
//! Read paths never fail hard. An unknown security or an out-of-range level
//! gives a zero depth or an empty [`LevelView`], plus a `warn!` diagnostic.
//!
//! ## Example
//!
//! ```
//! use ladder_book::OrderBook;
//! use ladder_book::types::{OrderRecord, Side};
//!
//! let mut book = OrderBook::new();
//! book.process(&OrderRecord::add(1, Side::Buy, "US30303M1027", 100.0, 5_000)).unwrap();
//! book.process(&OrderRecord::add(2, Side::Sell, "US30303M1027", 100.5, 7_000)).unwrap();
//!
//! assert!(book.exists("US30303M1027"));
//! assert_eq!(book.depth("US30303M1027", Side::Buy), 1);
//! assert_eq!(book.top("US30303M1027", Side::Sell).total_volume(), 7_000);
//! ```

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::error::{BookError, Result};
use crate::orderbook::render::{self, DepthRow};
use crate::orderbook::{InstrumentBook, Ladder, LevelOrder, LevelView};
use crate::types::{Action, CompactOrder, OrderRecord, ReplayReport, Side};

/// Order book across all securities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBook {
    /// Security identifier to its bid/ask ladders
    instruments: HashMap<String, InstrumentBook>,
}

impl OrderBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a book with room for `securities` instruments before rehashing
    ///
    /// # Example
    ///
    /// ```
    /// use ladder_book::OrderBook;
    ///
    /// let book = OrderBook::with_capacity(64);
    /// assert_eq!(book.security_count(), 0);
    /// ```
    pub fn with_capacity(securities: usize) -> Self {
        Self {
            instruments: HashMap::with_capacity(securities),
        }
    }

    // ========================================================================
    // Event processing
    // ========================================================================

    /// Apply one feed event.
    ///
    /// The instrument book for `order.security` is created first, so even a
    /// rejected event makes its security known to [`exists`](Self::exists).
    ///
    /// # Errors
    ///
    /// - `InvalidAction` / `InvalidSide` for codes outside the known sets
    /// - `PriceLevelNotFound` / `OrderIdNotFound` for a Modify or Delete that
    ///   matches no resting order
    /// - `DuplicateOrderId` for an Add whose id already rests on that side
    ///
    /// In every case the ladders are left unchanged.
    pub fn process(&mut self, order: &OrderRecord) -> Result<()> {
        let instrument = self.instrument_entry(&order.security);

        let result = match order.action() {
            Some(Action::Add) => instrument.add(order.clone()),
            Some(Action::Modify) => instrument.modify(order.clone()).map(|_| ()),
            Some(Action::Delete) => instrument.delete(order).map(|_| ()),
            None => Err(BookError::InvalidAction(order.action_raw)),
        };

        match &result {
            Ok(()) => trace!(
                security = %order.security,
                order_id = order.id,
                action = order.action_raw,
                side = order.side_raw,
                price = order.price,
                volume = order.volume,
                "event applied"
            ),
            Err(BookError::InvalidAction(code)) => {
                warn!(security = %order.security, order_id = order.id, code, "unhandled order action")
            }
            Err(BookError::InvalidSide(code)) => {
                warn!(security = %order.security, order_id = order.id, code, "unhandled order side")
            }
            Err(_) => {}
        }
        result
    }

    /// Apply a sequence of events in order, collecting a summary.
    ///
    /// Rejected events are counted and logged, never fatal.
    pub fn replay<'a, I>(&mut self, events: I) -> ReplayReport
    where
        I: IntoIterator<Item = &'a OrderRecord>,
    {
        let mut processed = 0u64;
        let mut rejected = 0u64;

        for order in events {
            processed += 1;
            if let Err(err) = self.process(order) {
                rejected += 1;
                debug!(error = %err, code = err.code(), "event rejected");
            }
        }

        ReplayReport::new(processed, rejected, self.state_root())
    }

    fn instrument_entry(&mut self, security: &str) -> &mut InstrumentBook {
        self.instruments
            .entry(security.to_string())
            .or_insert_with(|| {
                debug!(security, "new instrument");
                InstrumentBook::new()
            })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Check if a security has been seen
    #[inline]
    pub fn exists(&self, security: &str) -> bool {
        self.instruments.contains_key(security)
    }

    /// Number of securities known to the book
    #[inline]
    pub fn security_count(&self) -> usize {
        self.instruments.len()
    }

    /// Both ladders of a security
    #[inline]
    pub fn instrument(&self, security: &str) -> Option<&InstrumentBook> {
        self.instruments.get(security)
    }

    /// Number of occupied price levels on one side.
    ///
    /// # Errors
    ///
    /// `UnknownSecurity` if the security has never been seen
    pub fn try_depth(&self, security: &str, side: Side) -> Result<usize> {
        self.instruments
            .get(security)
            .map(|book| book.depth(side))
            .ok_or_else(|| BookError::UnknownSecurity(security.to_string()))
    }

    /// Number of occupied price levels on one side, 0 for an unknown security
    pub fn depth(&self, security: &str, side: Side) -> usize {
        self.try_depth(security, side).unwrap_or_else(|err| {
            warn!(error = %err, "depth requested for unknown security");
            0
        })
    }

    /// Orders resting at the `index`-th level of one side (0 = best).
    ///
    /// Unknown securities and out-of-range indices give an empty view.
    pub fn level_at(&self, security: &str, side: Side, index: usize) -> LevelView<'_> {
        match self.instruments.get(security) {
            Some(book) => LevelView::from(book.level_at(side, index)),
            None => {
                warn!(security, "level requested for unknown security");
                LevelView::empty()
            }
        }
    }

    /// Orders resting at the best level of one side
    #[inline]
    pub fn top(&self, security: &str, side: Side) -> LevelView<'_> {
        self.level_at(security, side, 0)
    }

    /// Side-by-side depth rows for a security.
    ///
    /// # Errors
    ///
    /// `UnknownSecurity` if the security has never been seen
    pub fn render(&self, security: &str) -> Result<Vec<DepthRow>> {
        let book = self
            .instruments
            .get(security)
            .ok_or_else(|| BookError::UnknownSecurity(security.to_string()))?;
        Ok(render::depth_rows(&book.bid, &book.ask))
    }

    // ========================================================================
    // State root
    // ========================================================================

    /// SHA-256 over the resting state of every security.
    ///
    /// Securities are hashed in lexicographic order; for each, the bid ladder
    /// then the ask ladder, every level in priority order and every order in
    /// queue order, each order as its compact SSZ encoding. Identical resting
    /// state always gives the same root.
    pub fn compute_state_root(&self) -> [u8; 32] {
        let mut securities: Vec<&String> = self.instruments.keys().collect();
        securities.sort();

        let mut state = Vec::new();
        for security in securities {
            let book = &self.instruments[security];
            state.extend_from_slice(security.as_bytes());
            state.push(0);
            append_ladder(&mut state, &book.bid);
            append_ladder(&mut state, &book.ask);
        }
        ReplayReport::compute_hash(&state)
    }

    /// Alias of [`compute_state_root`](Self::compute_state_root)
    #[inline]
    pub fn state_root(&self) -> [u8; 32] {
        self.compute_state_root()
    }
}

fn append_ladder<O: LevelOrder>(state: &mut Vec<u8>, ladder: &Ladder<O>) {
    state.extend_from_slice(&(ladder.depth() as u64).to_le_bytes());
    for level in ladder.levels() {
        state.extend_from_slice(&level.price().to_bits().to_le_bytes());
        state.extend_from_slice(&(level.len() as u64).to_le_bytes());
        for order in level.iter() {
            append_order(state, order);
        }
    }
}

fn append_order(state: &mut Vec<u8>, order: &OrderRecord) {
    match CompactOrder::from_record(order).and_then(|compact| compact.encode()) {
        Ok(bytes) => state.extend_from_slice(&bytes),
        Err(err) => {
            // Records that do not fit the compact layout are hashed field by field
            trace!(error = %err, order_id = order.id, "hashing order without compact encoding");
            state.extend_from_slice(&order.id.to_le_bytes());
            state.extend_from_slice(&[order.action_raw, order.side_raw, order.constraint_raw]);
            state.extend_from_slice(order.security.as_bytes());
            state.push(0);
            state.extend_from_slice(&order.price.to_bits().to_le_bytes());
            state.extend_from_slice(&order.volume.to_le_bytes());
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
