//! Globally unique 64-bit (i64) key generator.
//!
//! Relies on 2 invariants:
//!
//! 1. Each middleware instance must have a unique, numeric node ID,
//!    not exceeding 1023.
//! 2. Each instance has a reasonably accurate and synchronized clock,
//!    so `std::time::SystemTime` returns a good value.

use std::thread::sleep;
use std::time::UNIX_EPOCH;
use std::time::{Duration, SystemTime};

use parking_lot::Mutex;
use thiserror::Error;

use super::KeyGenerator;

const NODE_BITS: u64 = 10; // Max 1023 nodes
const SEQUENCE_BITS: u64 = 12;
const TIMESTAMP_BITS: u64 = 41; // 41 bits = ~69 years, keeps i64 sign bit clear
const MAX_NODE_ID: u64 = (1 << NODE_BITS) - 1; // 1023
const MAX_SEQUENCE: u64 = (1 << SEQUENCE_BITS) - 1; // 4095
const MAX_TIMESTAMP: u64 = (1 << TIMESTAMP_BITS) - 1;
const EPOCH: u64 = 1704067200000; // Monday, January 1, 2024 12:00:00 AM GMT
const NODE_SHIFT: u8 = SEQUENCE_BITS as u8; // 12
const TIMESTAMP_SHIFT: u8 = (SEQUENCE_BITS + NODE_BITS) as u8; // 22

#[derive(Debug, Error)]
pub enum Error {
    #[error("node ID exceeding maximum (1023): {0}")]
    NodeIdTooLarge(u64),
}

#[derive(Debug, Default)]
struct State {
    last_timestamp_ms: u64,
    sequence: u64,
}

impl State {
    // Generate next unique ID in a distributed sequence.
    // The `node_id` argument must be globally unique.
    fn next_id(&mut self, node_id: u64) -> u64 {
        let mut now = wait_until(self.last_timestamp_ms);

        if now == self.last_timestamp_ms {
            self.sequence = (self.sequence + 1) & MAX_SEQUENCE;
            // Wraparound.
            if self.sequence == 0 {
                now = wait_until(now + 1);
            }
        } else {
            // Reset sequence to zero once we reach next ms.
            self.sequence = 0;
        }

        self.last_timestamp_ms = now;

        let elapsed = self.last_timestamp_ms - EPOCH;
        assert!(
            elapsed <= MAX_TIMESTAMP,
            "key generator timestamp overflow: {elapsed} > {MAX_TIMESTAMP}"
        );
        let timestamp_part = (elapsed & MAX_TIMESTAMP) << TIMESTAMP_SHIFT;
        let node_part = node_id << NODE_SHIFT;
        let sequence_part = self.sequence;

        timestamp_part | node_part | sequence_part
    }
}

// Get current time in ms.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("SystemTime is before UNIX_EPOCH")
        .as_millis() as u64
}

// Get a monotonically increasing timestamp in ms.
// Protects against clock drift.
fn wait_until(target_ms: u64) -> u64 {
    loop {
        let now = now_ms();
        if now >= target_ms {
            return now;
        }
        sleep(Duration::from_millis(1));
    }
}

/// Snowflake-style key generator: 41-bit timestamp, 10-bit node,
/// 12-bit sequence.
#[derive(Debug)]
pub struct SnowflakeGenerator {
    node_id: u64,
    inner: Mutex<State>,
}

impl SnowflakeGenerator {
    pub fn new(node_id: u64) -> Result<Self, Error> {
        if node_id > MAX_NODE_ID {
            return Err(Error::NodeIdTooLarge(node_id));
        }

        Ok(Self {
            node_id,
            inner: Mutex::new(State::default()),
        })
    }
}

impl KeyGenerator for SnowflakeGenerator {
    fn generate(&self) -> i64 {
        self.inner.lock().next_id(self.node_id) as i64
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_unique_ids() {
        let generator = SnowflakeGenerator::new(1).unwrap();
        let num_ids = 10_000;

        let mut ids = HashSet::new();

        for _ in 0..num_ids {
            ids.insert(generator.generate());
        }

        assert_eq!(ids.len(), num_ids);
    }

    #[test]
    fn test_ids_monotonically_increasing() {
        let mut state = State::default();
        let node_id = 1u64;

        let mut prev_id = 0u64;
        for _ in 0..10_000 {
            let id = state.next_id(node_id);
            assert!(id > prev_id, "ID {id} not greater than previous {prev_id}");
            prev_id = id;
        }
    }

    #[test]
    fn test_ids_always_positive() {
        let mut state = State::default();
        let node_id = MAX_NODE_ID; // Use max node to maximize bits used

        for _ in 0..10_000 {
            let id = state.next_id(node_id);
            let signed = id as i64;
            assert!(signed > 0, "ID should be positive, got {signed}");
        }
    }

    #[test]
    fn test_bit_layout() {
        // Verify the bit allocation: 41 timestamp + 10 node + 12 sequence = 63 bits
        assert_eq!(TIMESTAMP_BITS + NODE_BITS + SEQUENCE_BITS, 63);
        assert_eq!(TIMESTAMP_SHIFT, 22);
        assert_eq!(NODE_SHIFT, 12);
    }

    #[test]
    fn test_max_values_fit() {
        // Construct an ID with max values and verify it stays positive
        let id = (MAX_TIMESTAMP << TIMESTAMP_SHIFT) | (MAX_NODE_ID << NODE_SHIFT) | MAX_SEQUENCE;
        let signed = id as i64;

        assert!(signed > 0, "Max ID should be positive, got {signed}");
        assert_eq!(id >> 63, 0, "Bit 63 should be clear");
    }

    #[test]
    fn test_extract_components() {
        let node: u64 = 42;
        let mut state = State::default();

        let id = state.next_id(node);

        // Extract components back
        let extracted_seq = id & MAX_SEQUENCE;
        let extracted_node = (id >> NODE_SHIFT) & MAX_NODE_ID;
        let extracted_elapsed = id >> TIMESTAMP_SHIFT;

        assert_eq!(extracted_node, node);
        assert_eq!(extracted_seq, 0); // First ID has sequence 0
        assert!(extracted_elapsed > 0); // Elapsed time since epoch

        // Generate another ID and verify sequence increments
        let id2 = state.next_id(node);
        let extracted_node2 = (id2 >> NODE_SHIFT) & MAX_NODE_ID;

        assert_eq!(extracted_node2, node);
        assert!(matches!(id2 & MAX_SEQUENCE, 1 | 0)); // Sequence incremented (or time advanced and reset to 0)
    }

    #[test]
    fn test_node_id_too_large() {
        assert!(SnowflakeGenerator::new(MAX_NODE_ID).is_ok());
        assert!(SnowflakeGenerator::new(MAX_NODE_ID + 1).is_err());
    }
}
