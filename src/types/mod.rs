//! Core data types for the order book
//!
//! ## Types
//!
//! - [`OrderRecord`]: One order event, and a resting order's state
//! - [`Action`], [`Side`], [`Constraint`]: Closed code sets carried by a record
//! - [`Price`]: Totally ordered `f32` level key
//! - [`CompactOrder`]: Fixed-width encoding of a record
//! - [`ReplayReport`]: Summary of a replayed feed

mod order;
mod report;
pub mod compact;
pub mod price;

// Re-export all types at module level
pub use order::{Action, Constraint, OrderRecord, Side};
pub use price::Price;
pub use compact::{CompactError, CompactOrder};
pub use report::ReplayReport;
