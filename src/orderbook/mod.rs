//! Order book module.
//!
//! ## Architecture
//!
//! ```text
//! OrderBook
//!   └── security -> InstrumentBook
//!                     ├── bid: Ladder<Bids>   (BTreeMap, highest price first)
//!                     └── ask: Ladder<Asks>   (BTreeMap, lowest price first)
//!                                └── PriceLevel (VecDeque, arrival order)
//! ```
//!
//! - **Price levels**: orders grouped by price using `BTreeMap`
//! - **Price-time priority**: FIFO ordering at each price level
//! - **No crossing**: bids and asks rest side by side, nothing is matched
//!
//! ## Components
//!
//! - [`PriceLevel`]: Collection of orders at a single price point
//! - [`Ladder`]: One side of one security, generic over [`LevelOrder`]
//! - [`InstrumentBook`]: Bid and ask ladders of a security
//! - [`OrderBook`]: All securities, event processing and queries
//! - [`DepthRow`]: Side-by-side depth table rows
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Add order | O(log P) |
//! | Modify / Delete, ascending ids | O(log P + log N) |
//! | Modify / Delete, out-of-order ids | O(log P + N) |
//! | Best bid/ask | O(log P) |
//! | Level at index i | O(i) |
//!
//! P = price levels on the side, N = orders at the level.

pub mod book;
pub mod instrument;
pub mod ladder;
pub mod level;
pub mod render;

pub use book::OrderBook;
pub use instrument::InstrumentBook;
pub use ladder::{Asks, Bids, Ladder, LevelOrder, LevelView};
pub use level::PriceLevel;
pub use render::{DepthRow, LevelSummary};
