//! Price level key.
//!
//! ## Overview
//!
//! Feed prices arrive as single-precision floats and are used directly as
//! level keys: two orders share a level only if their prices are the same
//! `f32` value. `f32` is not `Ord`, so [`Price`] wraps it and orders by
//! [`f32::total_cmp`], which makes it usable as a `BTreeMap` key.
//!
//! Under total ordering `-0.0 < 0.0` and NaN sorts above `+inf`, so neither
//! breaks the ladder; they simply form their own levels.
//!
//! ## Example
//!
//! ```
//! use ladder_book::types::Price;
//!
//! let a = Price::new(99.9);
//! let b = Price::new(100.1);
//! assert!(a < b);
//! assert_eq!(Price::new(100.0), Price::from(100.0_f32));
//! ```

use std::cmp::Ordering;
use std::fmt;

/// Totally ordered `f32` price.
#[derive(Debug, Clone, Copy, Default)]
pub struct Price(f32);

impl Price {
    /// Wrap a raw feed price
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// The raw `f32` value
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Bit pattern used by the compact record
    #[inline]
    pub fn to_bits(self) -> u32 {
        self.0.to_bits()
    }

    /// Rebuild a price from its bit pattern
    #[inline]
    pub fn from_bits(bits: u32) -> Self {
        Self(f32::from_bits(bits))
    }
}

impl From<f32> for Price {
    fn from(value: f32) -> Self {
        Self(value)
    }
}

impl From<Price> for f32 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Price {}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Reverse;
    use std::collections::BTreeMap;

    #[test]
    fn test_price_ordering() {
        assert!(Price::new(99.9) < Price::new(100.0));
        assert!(Price::new(100.1) > Price::new(100.0));
        assert_eq!(Price::new(100.0), Price::new(100.0));
    }

    #[test]
    fn test_price_special_values() {
        assert!(Price::new(-0.0) < Price::new(0.0));
        assert!(Price::new(f32::NAN) > Price::new(f32::INFINITY));
        assert_eq!(Price::new(f32::NAN), Price::new(f32::NAN));
    }

    #[test]
    fn test_price_bits_roundtrip() {
        let price = Price::new(100.1);
        assert_eq!(Price::from_bits(price.to_bits()), price);
        assert_eq!(Price::from_bits(price.to_bits()).value(), 100.1_f32);
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::new(100.1).to_string(), "100.1");
        assert_eq!(Price::new(100.0).to_string(), "100");
    }

    #[test]
    fn test_price_as_map_key() {
        let mut asks = BTreeMap::new();
        let mut bids = BTreeMap::new();
        for p in [100.5_f32, 100.1, 100.8] {
            asks.insert(Price::new(p), ());
            bids.insert(Reverse(Price::new(p)), ());
        }

        let ask_order: Vec<f32> = asks.keys().map(|p| p.value()).collect();
        let bid_order: Vec<f32> = bids.keys().map(|r| r.0.value()).collect();
        assert_eq!(ask_order, vec![100.1, 100.5, 100.8]);
        assert_eq!(bid_order, vec![100.8, 100.5, 100.1]);
    }
}
