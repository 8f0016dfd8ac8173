//! Side-by-side depth rows.
//!
//! Row *i* pairs the bid level at depth *i* with the ask level at depth *i*.
//! Rows continue until both sides are exhausted; the shorter side reports
//! `None` for the remaining rows and displays as `N/A`.
//!
//! ```text
//! Bid volume         |Bid price          |Ask volume         |Ask price
//! --------------------------------------------------------------------------------
//! 5500               |100                |10000              |100.1
//! 2000               |99.9               |7000               |100.5
//! N/A                |N/A                |500                |100.8
//! ```

use std::fmt;

use crate::orderbook::{Asks, Bids, Ladder, PriceLevel};
use crate::types::Price;

/// Marker printed for a side with no level at a given depth
pub const NO_DATA: &str = "N/A";

/// Width of each table column
const COLUMN_WIDTH: usize = 19;

/// Aggregate volume and price of one level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelSummary {
    /// Sum of resting volume at the level
    pub volume: u64,

    /// Level price
    pub price: Price,
}

impl From<&PriceLevel> for LevelSummary {
    fn from(level: &PriceLevel) -> Self {
        Self {
            volume: level.total_volume(),
            price: level.price(),
        }
    }
}

/// One row of the depth table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRow {
    /// Bid level at this depth, `None` once the bid side is exhausted
    pub bid: Option<LevelSummary>,

    /// Ask level at this depth, `None` once the ask side is exhausted
    pub ask: Option<LevelSummary>,
}

/// Pair the two ladders level by level
pub fn depth_rows(bid: &Ladder<Bids>, ask: &Ladder<Asks>) -> Vec<DepthRow> {
    let mut bids = bid.levels();
    let mut asks = ask.levels();
    let mut rows = Vec::with_capacity(bid.depth().max(ask.depth()));

    loop {
        let row = DepthRow {
            bid: bids.next().map(LevelSummary::from),
            ask: asks.next().map(LevelSummary::from),
        };
        if row.bid.is_none() && row.ask.is_none() {
            break;
        }
        rows.push(row);
    }
    rows
}

/// Column header matching [`DepthRow`]'s `Display` layout
pub fn header() -> String {
    format!(
        "{:<w$}|{:<w$}|{:<w$}|{:<w$}",
        "Bid volume",
        "Bid price",
        "Ask volume",
        "Ask price",
        w = COLUMN_WIDTH
    )
}

fn write_side(f: &mut fmt::Formatter<'_>, side: Option<LevelSummary>) -> fmt::Result {
    match side {
        Some(level) => write!(
            f,
            "{:<w$}|{:<w$}",
            level.volume,
            level.price.to_string(),
            w = COLUMN_WIDTH
        ),
        None => write!(f, "{:<w$}|{:<w$}", NO_DATA, NO_DATA, w = COLUMN_WIDTH),
    }
}

impl fmt::Display for DepthRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_side(f, self.bid)?;
        f.write_str("|")?;
        write_side(f, self.ask)
    }
}
