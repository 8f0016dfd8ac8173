//! # Ladder Book
//!
//! In-memory limit order book driven by an incremental Add/Modify/Delete feed.
//!
//! ## Architecture
//!
//! - **Types**: Core data structures (OrderRecord, Price, CompactOrder, ReplayReport)
//! - **OrderBook**: Per-security bid/ask ladders with price-time priority
//! - **Feed**: The built-in sample feed
//!
//! ## Design Principles
//!
//! 1. **Consistency**: A rejected event leaves the book exactly as it was
//! 2. **Determinism**: Identical feeds give identical books and state roots
//! 3. **No crossing**: Orders rest, nothing is matched or executed
//! 4. **Synchronous Execution**: One writer, no locks, no I/O in the book
//!
//! ## Example
//!
//! ```
//! use ladder_book::{feed, OrderBook, Side};
//!
//! let mut book = OrderBook::new();
//! let report = book.replay(&feed::sample_feed());
//!
//! assert_eq!(report.events_rejected, 0);
//! assert_eq!(book.depth(feed::FORWARD_SECURITY, Side::Buy), 2);
//! assert_eq!(book.depth(feed::FORWARD_SECURITY, Side::Sell), 3);
//! assert!(!book.exists(feed::ABSENT_SECURITY));
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Error taxonomy and result alias
pub mod error;

/// Core data types: OrderRecord, Price, CompactOrder, ReplayReport
pub mod types;

/// Order book: ladders, instruments and the security-keyed book
pub mod orderbook;

/// Sample event feed
pub mod feed;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use error::{BookError, Result};
pub use types::{Action, CompactOrder, Constraint, OrderRecord, Price, ReplayReport, Side};
pub use orderbook::{DepthRow, InstrumentBook, LevelView, OrderBook, PriceLevel};
