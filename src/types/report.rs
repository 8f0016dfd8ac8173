//! Replay summary for a batch of feed events.
//!
//! A [`ReplayReport`] is produced by [`OrderBook::replay`](crate::OrderBook::replay)
//! and records how many events were accepted and rejected, together with the
//! state root of the book after the last event.

use sha2::{Digest, Sha256};

/// Summary of a replayed event sequence.
///
/// ## State Root
///
/// The 32-byte state root is a SHA-256 hash of the resting book. Two replays
/// of the same events into fresh books produce the same root.
///
/// ## Example
///
/// ```
/// use ladder_book::types::ReplayReport;
///
/// let report = ReplayReport::new(10, 2, [0u8; 32]);
/// assert_eq!(report.events_accepted(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplayReport {
    /// Number of events fed to the book
    pub events_processed: u64,

    /// Number of events the book rejected
    pub events_rejected: u64,

    /// State root after the last event
    pub state_root: [u8; 32],
}

impl ReplayReport {
    /// Create a new report
    pub fn new(events_processed: u64, events_rejected: u64, state_root: [u8; 32]) -> Self {
        Self {
            events_processed,
            events_rejected,
            state_root,
        }
    }

    /// Compute SHA-256 hash of the given data
    pub fn compute_hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        let result = hasher.finalize();

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }

    /// Events the book accepted
    pub fn events_accepted(&self) -> u64 {
        self.events_processed.saturating_sub(self.events_rejected)
    }

    /// Get the state root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }

    /// True if no events were replayed
    pub fn is_empty(&self) -> bool {
        self.events_processed == 0
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
