// SPDX-License-Identifier: MPL-2.0
//! Sizing of the telemetry collector.
//!
//! The collector keeps records in a ring buffer fed by a bounded channel.
//! Both sizes derive from one configured record count.

/// Record capacity bounds and the ingest channel size.
pub mod record_capacity_bounds {
    pub const MIN: usize = 100;
    pub const MAX: usize = 10_000;
    pub const DEFAULT: usize = 1_000;
    /// Records that may wait in the channel between two drains.
    pub const CHANNEL_SLOTS: usize = 100;
}

/// How many telemetry records the collector retains.
///
/// Once full, the oldest record is evicted for each new one. The ingest
/// channel never holds more records than the buffer can keep.
///
/// ```
/// use alitheia_workbench::domain::telemetry::BufferCapacity;
///
/// let capacity = BufferCapacity::new(50_000);
/// assert_eq!(capacity.records(), 10_000);
/// assert_eq!(capacity.channel_slots(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferCapacity {
    records: usize,
}

impl BufferCapacity {
    #[must_use]
    pub fn new(records: usize) -> Self {
        Self {
            records: records.clamp(record_capacity_bounds::MIN, record_capacity_bounds::MAX),
        }
    }

    /// Ring buffer size in records.
    #[must_use]
    pub fn records(self) -> usize {
        self.records
    }

    /// Size of the bounded channel in front of the buffer.
    #[must_use]
    pub fn channel_slots(self) -> usize {
        record_capacity_bounds::CHANNEL_SLOTS.min(self.records)
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self::new(record_capacity_bounds::DEFAULT)
    }
}
