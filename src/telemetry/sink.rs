// SPDX-License-Identifier: MPL-2.0
//! Telemetry sinks.
//!
//! A sink is the transport end of tracking. The [`Tracker`](super::Tracker)
//! never lets a sink failure reach its caller, so implementations are free to
//! return errors whenever delivery is not possible.

use thiserror::Error;

use super::records::{ErrorRecord, EventRecord};

/// Reasons a sink could not accept a record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The sink's buffer is full; the record was dropped.
    #[error("telemetry buffer full")]
    Full,
    /// The receiving side is gone.
    #[error("telemetry collector disconnected")]
    Disconnected,
    /// The backend could not be reached. For external sink implementations;
    /// the bundled sinks never return it.
    #[error("telemetry backend unavailable: {0}")]
    Unavailable(String),
    /// The backend rejected the payload. For external sink implementations;
    /// the bundled sinks never return it.
    #[error("malformed telemetry payload: {0}")]
    Malformed(String),
}

/// Destination for telemetry records.
pub trait TelemetrySink: Send + Sync {
    /// Accepts an event record.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] if the record could not be delivered.
    fn record_event(&self, record: EventRecord) -> Result<(), SinkError>;

    /// Accepts an error record.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] if the record could not be delivered.
    fn record_error(&self, record: ErrorRecord) -> Result<(), SinkError>;
}

/// Discards every record. Used when telemetry is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn record_event(&self, _record: EventRecord) -> Result<(), SinkError> {
        Ok(())
    }

    fn record_error(&self, _record: ErrorRecord) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Emits records as `tracing` events under the `telemetry` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TelemetrySink for TracingSink {
    fn record_event(&self, record: EventRecord) -> Result<(), SinkError> {
        tracing::info!(
            target: "telemetry",
            action = %record.action,
            category = %record.category,
            label = %record.label,
            data = %record.additional_data,
            "event"
        );
        Ok(())
    }

    fn record_error(&self, record: ErrorRecord) -> Result<(), SinkError> {
        tracing::warn!(
            target: "telemetry",
            action = %record.action,
            error = %record.error,
            context = %record.context,
            "error"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::records::Category;

    #[test]
    fn null_sink_accepts_everything() {
        let sink = NullSink;
        assert!(sink
            .record_event(EventRecord::new("click", Category::Interaction, "x"))
            .is_ok());
        assert!(sink.record_error(ErrorRecord::new("load", "boom")).is_ok());
    }

    #[test]
    fn tracing_sink_accepts_without_subscriber() {
        let sink = TracingSink;
        assert!(sink
            .record_event(EventRecord::new("click", Category::Interaction, "x"))
            .is_ok());
        assert!(sink.record_error(ErrorRecord::new("load", "boom")).is_ok());
    }

    #[test]
    fn sink_error_messages() {
        assert_eq!(SinkError::Full.to_string(), "telemetry buffer full");
        assert_eq!(
            SinkError::Unavailable("offline".into()).to_string(),
            "telemetry backend unavailable: offline"
        );
    }

    struct RejectingSink;

    impl TelemetrySink for RejectingSink {
        fn record_event(&self, record: EventRecord) -> Result<(), SinkError> {
            Err(SinkError::Malformed(record.action))
        }

        fn record_error(&self, _record: ErrorRecord) -> Result<(), SinkError> {
            Err(SinkError::Unavailable("maintenance window".into()))
        }
    }

    #[test]
    fn custom_sink_errors_stay_inside_tracker() {
        let sink = RejectingSink;
        assert_eq!(
            sink.record_event(EventRecord::new("click", Category::Interaction, "x")),
            Err(SinkError::Malformed("click".into()))
        );

        let tracker = crate::telemetry::Tracker::new(RejectingSink);
        tracker.on_click("approve", serde_json::Value::Null);
        tracker.on_error("load_case", "timeout", serde_json::Value::Null);
    }
}
