// SPDX-License-Identifier: MPL-2.0
//! Interaction tracking for workbench screens.
//!
//! Screens report lifecycle and interaction events through a [`Tracker`]
//! without knowing where the records go. The tracker forwards to a
//! [`TelemetrySink`] and swallows every delivery failure.
//!
//! # Architecture
//!
//! - [`Tracker`]: `on_mount`, `on_render`, `on_click`, `on_error`, ...
//! - [`ComponentTracker`]: per-component render counter, props diff and
//!   unmount-on-drop
//! - [`TelemetrySink`]: transport seam, with [`TracingSink`], [`NullSink`]
//!   and the collector's [`ChannelSink`]
//! - [`TelemetryCollector`]: bounded in-memory store with JSON export
//!
//! # Privacy
//!
//! Error text is passed through [`sanitize_message`] before it is recorded.

mod buffer;
mod collector;
mod component;
mod export;
mod records;
mod sanitizer;
mod sink;
mod tracker;

pub use buffer::RingBuffer;
pub use collector::{ChannelSink, Collected, TelemetryCollector};
pub use component::{diff_props, ComponentTracker, Props};
pub use export::{
    default_export_directory, generate_default_filename, write_atomic, ExportError,
    ReportMetadata, SerializableRecord, TelemetryReport, TelemetrySummary,
};
pub use records::{actions, Category, ErrorRecord, EventRecord, TelemetryRecord};
pub use sanitizer::sanitize_message;
pub use sink::{NullSink, SinkError, TelemetrySink, TracingSink};
pub use tracker::{PropChange, PropChanges, Tracker};
