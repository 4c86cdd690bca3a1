// SPDX-License-Identifier: MPL-2.0
//! In-process telemetry collector.
//!
//! Sink handles push records through a bounded channel; the collector drains
//! them into a ring buffer on [`TelemetryCollector::process_pending`] and can
//! export everything it holds as a JSON report.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use super::buffer::RingBuffer;
use super::export::{
    write_atomic, ExportError, ReportMetadata, SerializableRecord, TelemetryReport,
    TelemetrySummary,
};
use super::records::{ErrorRecord, EventRecord, TelemetryRecord};
use super::sink::{SinkError, TelemetrySink};
use crate::domain::telemetry::BufferCapacity;

/// A record and the moment it was handed to the sink.
#[derive(Debug, Clone)]
pub struct Collected {
    pub recorded_at: Instant,
    pub record: TelemetryRecord,
}

impl Collected {
    fn now(record: TelemetryRecord) -> Self {
        Self {
            recorded_at: Instant::now(),
            record,
        }
    }
}

/// Sink half of a [`TelemetryCollector`].
///
/// Cheap to clone and `Send`. Sending never blocks: a full channel drops the
/// record and reports [`SinkError::Full`].
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: Sender<Collected>,
}

impl ChannelSink {
    fn send(&self, record: TelemetryRecord) -> Result<(), SinkError> {
        self.tx
            .try_send(Collected::now(record))
            .map_err(|err| match err {
                TrySendError::Full(_) => SinkError::Full,
                TrySendError::Disconnected(_) => SinkError::Disconnected,
            })
    }
}

impl TelemetrySink for ChannelSink {
    fn record_event(&self, record: EventRecord) -> Result<(), SinkError> {
        self.send(TelemetryRecord::Event(record))
    }

    fn record_error(&self, record: ErrorRecord) -> Result<(), SinkError> {
        self.send(TelemetryRecord::Error(record))
    }
}

/// Central store for telemetry records.
pub struct TelemetryCollector {
    buffer: RingBuffer<Collected>,
    rx: Receiver<Collected>,
    tx: Sender<Collected>,
    started_at: Instant,
    started_at_utc: DateTime<Utc>,
}

impl TelemetryCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self::with_buffers(RingBuffer::new(capacity), capacity.channel_slots())
    }

    /// Creates a collector with explicit raw buffer and channel sizes.
    ///
    /// Intended for tests that need to observe eviction or a full channel.
    #[must_use]
    pub fn with_raw_capacities(buffer_capacity: usize, channel_capacity: usize) -> Self {
        Self::with_buffers(
            RingBuffer::with_raw_capacity(buffer_capacity),
            channel_capacity,
        )
    }

    fn with_buffers(buffer: RingBuffer<Collected>, channel_capacity: usize) -> Self {
        let (tx, rx) = bounded(channel_capacity.max(1));
        Self {
            buffer,
            rx,
            tx,
            started_at: Instant::now(),
            started_at_utc: Utc::now(),
        }
    }

    /// Creates a sink feeding this collector.
    #[must_use]
    pub fn sink(&self) -> ChannelSink {
        ChannelSink {
            tx: self.tx.clone(),
        }
    }

    /// Moves every queued record into the buffer and returns how many moved.
    pub fn process_pending(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(collected) = self.rx.try_recv() {
            self.buffer.push(collected);
            drained += 1;
        }
        drained
    }

    /// Stored records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &TelemetryRecord> {
        self.buffer.iter().map(|collected| &collected.record)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Records lost to buffer eviction.
    #[must_use]
    pub fn evicted(&self) -> u64 {
        self.buffer.evicted()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn summary(&self) -> TelemetrySummary {
        TelemetrySummary::from_records(self.records())
    }

    /// Builds a report from the buffered records.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    pub fn report(&self) -> TelemetryReport {
        let collection_duration_ms = self.started_at.elapsed().as_millis() as u64;
        let records: Vec<SerializableRecord> = self
            .buffer
            .iter()
            .map(|collected| {
                SerializableRecord::new(
                    collected.recorded_at,
                    self.started_at,
                    collected.record.clone(),
                )
            })
            .collect();

        TelemetryReport {
            metadata: ReportMetadata::new(
                self.started_at_utc,
                collection_duration_ms,
                records.len(),
                self.buffer.evicted(),
            ),
            summary: self.summary(),
            records,
        }
    }

    /// Serializes the report as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.report())
    }

    /// Writes the report to `path` atomically.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Io` if file operations fail.
    /// Returns `ExportError::Serialization` if JSON serialization fails.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let path = path.as_ref();
        let json = self.export_json()?;
        write_atomic(path, &json)?;
        tracing::info!(path = %path.display(), records = self.len(), "telemetry report exported");
        Ok(path.to_path_buf())
    }
}

impl std::fmt::Debug for TelemetryCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryCollector")
            .field("len", &self.buffer.len())
            .field("capacity", &self.buffer.capacity())
            .field("pending", &self.rx.len())
            .field("evicted", &self.buffer.evicted())
            .finish()
    }
}
