//! Compact, fixed-width order record.
//!
//! ## Layout
//!
//! A [`CompactOrder`] carries the same logical fields as an
//! [`OrderRecord`] in a fixed-size SSZ container:
//!
//! | Field | Bytes | Contents |
//! |-------|-------|----------|
//! | `id` | 8 | order identifier |
//! | `flags` | 1 | bits 0-1 action, bit 2 side, bit 3 constraint |
//! | `security` | 16 | identifier bytes, NUL padded |
//! | `price_bits` | 4 | `f32::to_bits` of the price |
//! | `volume` | 8 | quantity |
//!
//! Total: 37 bytes on the wire. The compact form adds no semantics; it decodes
//! to an equivalent `OrderRecord`.
//!
//! ## Example
//!
//! ```
//! use ladder_book::types::{CompactOrder, OrderRecord, Side};
//!
//! let order = OrderRecord::add(1, Side::Buy, "US30303M1027", 100.1, 10_000);
//! let bytes = CompactOrder::from_record(&order).unwrap().encode().unwrap();
//! assert_eq!(bytes.len(), CompactOrder::ENCODED_LEN);
//!
//! let decoded = CompactOrder::decode(&bytes).unwrap().to_record().unwrap();
//! assert_eq!(decoded, order);
//! ```

use ssz_rs::prelude::*;
use thiserror::Error;

use crate::types::OrderRecord;

/// Fixed length of the security buffer
pub const SECURITY_LEN: usize = 16;

const ACTION_MASK: u8 = 0b0000_0011;
const SIDE_SHIFT: u8 = 2;
const CONSTRAINT_SHIFT: u8 = 3;

/// Errors converting between [`OrderRecord`] and [`CompactOrder`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompactError {
    /// Security identifier does not fit the fixed buffer
    #[error("security identifier is {0} bytes, the compact record holds 16")]
    SecurityTooLong(usize),

    /// A raw code does not fit its bit field
    #[error("{field} code {value} does not fit the compact bit field")]
    FieldOverflow { field: &'static str, value: u8 },

    /// Security buffer is not valid UTF-8
    #[error("security identifier is not valid UTF-8")]
    InvalidSecurity,

    /// SSZ encoding failed
    #[error("SSZ encode failed: {0}")]
    Encode(String),

    /// SSZ decoding failed
    #[error("SSZ decode failed: {0}")]
    Decode(String),
}

/// Bit-packed order record.
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct CompactOrder {
    /// Order identifier
    pub id: u64,

    /// Packed action (2 bits), side (1 bit) and constraint (1 bit)
    pub flags: u8,

    /// Security identifier, NUL padded
    pub security: [u8; SECURITY_LEN],

    /// Price as raw `f32` bits
    pub price_bits: u32,

    /// Quantity
    pub volume: u64,
}

impl CompactOrder {
    /// Size of the SSZ encoding: 8 + 1 + 16 + 4 + 8
    pub const ENCODED_LEN: usize = 37;

    /// Pack a record.
    ///
    /// Fails if the security identifier is longer than [`SECURITY_LEN`] bytes
    /// or a raw code is wider than its bit field.
    pub fn from_record(order: &OrderRecord) -> Result<Self, CompactError> {
        let flags = pack_flags(order.action_raw, order.side_raw, order.constraint_raw)?;

        let bytes = order.security.as_bytes();
        if bytes.len() > SECURITY_LEN {
            return Err(CompactError::SecurityTooLong(bytes.len()));
        }
        let mut security = [0u8; SECURITY_LEN];
        security[..bytes.len()].copy_from_slice(bytes);

        Ok(Self {
            id: order.id,
            flags,
            security,
            price_bits: order.price.to_bits(),
            volume: order.volume,
        })
    }

    /// Unpack into an equivalent record
    pub fn to_record(&self) -> Result<OrderRecord, CompactError> {
        let end = self
            .security
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(SECURITY_LEN);
        let security = std::str::from_utf8(&self.security[..end])
            .map_err(|_| CompactError::InvalidSecurity)?
            .to_string();

        Ok(OrderRecord {
            id: self.id,
            action_raw: self.action_code(),
            side_raw: self.side_code(),
            constraint_raw: self.constraint_code(),
            security,
            price: f32::from_bits(self.price_bits),
            volume: self.volume,
        })
    }

    /// Action code from bits 0-1
    #[inline]
    pub fn action_code(&self) -> u8 {
        self.flags & ACTION_MASK
    }

    /// Side code from bit 2
    #[inline]
    pub fn side_code(&self) -> u8 {
        (self.flags >> SIDE_SHIFT) & 1
    }

    /// Constraint code from bit 3
    #[inline]
    pub fn constraint_code(&self) -> u8 {
        (self.flags >> CONSTRAINT_SHIFT) & 1
    }

    /// SSZ encode
    pub fn encode(&self) -> Result<Vec<u8>, CompactError> {
        ssz_rs::serialize(self).map_err(|e| CompactError::Encode(format!("{:?}", e)))
    }

    /// SSZ decode
    pub fn decode(bytes: &[u8]) -> Result<Self, CompactError> {
        ssz_rs::deserialize::<Self>(bytes).map_err(|e| CompactError::Decode(format!("{:?}", e)))
    }
}

fn pack_flags(action: u8, side: u8, constraint: u8) -> Result<u8, CompactError> {
    if action > ACTION_MASK {
        return Err(CompactError::FieldOverflow { field: "action", value: action });
    }
    if side > 1 {
        return Err(CompactError::FieldOverflow { field: "side", value: side });
    }
    if constraint > 1 {
        return Err(CompactError::FieldOverflow { field: "constraint", value: constraint });
    }
    Ok(action | (side << SIDE_SHIFT) | (constraint << CONSTRAINT_SHIFT))
}

// ============================================================================
// Unit Tests
// ============================================================================
