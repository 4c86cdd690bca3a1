// SPDX-License-Identifier: MPL-2.0
//! Fire-and-forget interaction tracking.
//!
//! Every `on_*` method builds a record and hands it to the configured sink.
//! Delivery failures, including a panicking sink, are logged at debug level
//! and swallowed: tracking never changes what the caller does next.

use std::collections::BTreeMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::records::{actions, Category, ErrorRecord, EventRecord};
use super::sanitizer::sanitize_message;
use super::sink::{NullSink, SinkError, TelemetrySink};

/// Before/after pair for a changed prop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropChange {
    pub before: Value,
    pub after: Value,
}

/// Changed props keyed by name.
pub type PropChanges = BTreeMap<String, PropChange>;

/// Cheap-to-clone handle for reporting telemetry.
#[derive(Clone)]
pub struct Tracker {
    sink: Arc<dyn TelemetrySink>,
}

impl fmt::Debug for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracker").finish_non_exhaustive()
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::disabled()
    }
}

impl Tracker {
    pub fn new(sink: impl TelemetrySink + 'static) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    #[must_use]
    pub fn from_shared(sink: Arc<dyn TelemetrySink>) -> Self {
        Self { sink }
    }

    /// A tracker that discards everything.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(NullSink)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    pub fn on_mount(&self, component: &str) {
        self.track_event(EventRecord::new(actions::MOUNT, Category::Lifecycle, component));
    }

    pub fn on_unmount(&self, component: &str, duration_ms: u64) {
        self.track_event(
            EventRecord::new(actions::UNMOUNT, Category::Lifecycle, component)
                .with_data(json!({ "duration_ms": duration_ms })),
        );
    }

    /// Reports a re-render. The first render (`render_count <= 1`) is skipped.
    pub fn on_render(&self, component: &str, render_count: u64) {
        if render_count <= 1 {
            return;
        }
        self.track_event(
            EventRecord::new(actions::RENDER, Category::Render, component)
                .with_data(json!({ "render_count": render_count })),
        );
    }

    /// Reports changed props. Nothing is sent for an empty change set.
    pub fn on_props_change(&self, component: &str, changes: &PropChanges) {
        if changes.is_empty() {
            return;
        }
        let data = match serde_json::to_value(changes) {
            Ok(data) => data,
            Err(err) => {
                tracing::debug!(component, error = %err, "props change not serializable");
                return;
            }
        };
        self.track_event(
            EventRecord::new(actions::PROPS_CHANGE, Category::Render, component).with_data(
                json!({ "changed": data }),
            ),
        );
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    pub fn on_click(&self, name: &str, context: Value) {
        self.interaction(actions::CLICK, name, context);
    }

    pub fn on_input(&self, name: &str, context: Value) {
        self.interaction(actions::INPUT, name, context);
    }

    pub fn on_submit(&self, name: &str, context: Value) {
        self.interaction(actions::SUBMIT, name, context);
    }

    /// Reports a failure. The error text is sanitized before it leaves.
    pub fn on_error(&self, name: &str, error: impl fmt::Display, context: Value) {
        let message = sanitize_message(&error.to_string());
        self.track_error(ErrorRecord::new(name, message).with_context(context));
    }

    fn interaction(&self, action: &str, name: &str, context: Value) {
        self.track_event(EventRecord::new(action, Category::Interaction, name).with_data(context));
    }

    // =========================================================================
    // Delivery
    // =========================================================================

    /// Sends an arbitrary event record.
    pub fn track_event(&self, record: EventRecord) {
        let action = record.action.clone();
        self.deliver(&action, || self.sink.record_event(record));
    }

    /// Sends an arbitrary error record.
    pub fn track_error(&self, record: ErrorRecord) {
        let action = record.action.clone();
        self.deliver(&action, || self.sink.record_error(record));
    }

    fn deliver(&self, action: &str, send: impl FnOnce() -> Result<(), SinkError>) {
        match panic::catch_unwind(AssertUnwindSafe(send)) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => tracing::debug!(action, error = %err, "telemetry record dropped"),
            Err(_) => tracing::debug!(action, "telemetry sink panicked, record dropped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::records::TelemetryRecord;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        records: Mutex<Vec<TelemetryRecord>>,
    }

    impl TelemetrySink for RecordingSink {
        fn record_event(&self, record: EventRecord) -> Result<(), SinkError> {
            self.records.lock().unwrap().push(TelemetryRecord::Event(record));
            Ok(())
        }

        fn record_error(&self, record: ErrorRecord) -> Result<(), SinkError> {
            self.records.lock().unwrap().push(TelemetryRecord::Error(record));
            Ok(())
        }
    }

    struct FailingSink;

    impl TelemetrySink for FailingSink {
        fn record_event(&self, _record: EventRecord) -> Result<(), SinkError> {
            Err(SinkError::Unavailable("collector offline".into()))
        }

        fn record_error(&self, _record: ErrorRecord) -> Result<(), SinkError> {
            Err(SinkError::Malformed("bad context".into()))
        }
    }

    struct PanickingSink;

    impl TelemetrySink for PanickingSink {
        fn record_event(&self, _record: EventRecord) -> Result<(), SinkError> {
            panic!("sink exploded");
        }

        fn record_error(&self, _record: ErrorRecord) -> Result<(), SinkError> {
            panic!("sink exploded");
        }
    }

    fn recording() -> (Tracker, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        (Tracker::from_shared(sink.clone()), sink)
    }

    fn events(sink: &RecordingSink) -> Vec<TelemetryRecord> {
        sink.records.lock().unwrap().clone()
    }

    #[test]
    fn mount_and_unmount_are_lifecycle_events() {
        let (tracker, sink) = recording();
        tracker.on_mount("CaseReview");
        tracker.on_unmount("CaseReview", 1520);

        let records = events(&sink);
        assert_eq!(records.len(), 2);
        let TelemetryRecord::Event(unmount) = &records[1] else {
            panic!("expected event");
        };
        assert_eq!(unmount.action, actions::UNMOUNT);
        assert_eq!(unmount.category, Category::Lifecycle);
        assert_eq!(unmount.additional_data["duration_ms"], 1520);
    }

    #[test]
    fn first_render_is_skipped() {
        let (tracker, sink) = recording();
        tracker.on_render("RulesDesigner", 1);
        assert!(events(&sink).is_empty());

        tracker.on_render("RulesDesigner", 2);
        assert_eq!(events(&sink).len(), 1);
    }

    #[test]
    fn empty_props_change_is_not_sent() {
        let (tracker, sink) = recording();
        tracker.on_props_change("CaseReview", &PropChanges::new());
        assert!(events(&sink).is_empty());
    }

    #[test]
    fn props_change_carries_before_and_after() {
        let (tracker, sink) = recording();
        let mut changes = PropChanges::new();
        changes.insert(
            "case_id".into(),
            PropChange {
                before: json!("C-1"),
                after: json!("C-2"),
            },
        );

        tracker.on_props_change("CaseReview", &changes);

        let TelemetryRecord::Event(event) = &events(&sink)[0] else {
            panic!("expected event");
        };
        assert_eq!(event.additional_data["changed"]["case_id"]["before"], "C-1");
        assert_eq!(event.additional_data["changed"]["case_id"]["after"], "C-2");
    }

    #[test]
    fn interactions_use_interaction_category() {
        let (tracker, sink) = recording();
        tracker.on_click("approve", json!({ "case_id": "C-1" }));
        tracker.on_input("notes", Value::Null);
        tracker.on_submit("decision_form", Value::Null);

        let actions: Vec<_> = events(&sink)
            .iter()
            .map(|record| (record.action().to_string(), record.category()))
            .collect();
        assert_eq!(
            actions,
            vec![
                ("click".to_string(), Some(Category::Interaction)),
                ("input".to_string(), Some(Category::Interaction)),
                ("submit".to_string(), Some(Category::Interaction)),
            ]
        );
    }

    #[test]
    fn error_text_is_sanitized() {
        let (tracker, sink) = recording();
        tracker.on_error(
            "load_fixture",
            "cannot open /home/uw/cases.json",
            json!({ "attempt": 1 }),
        );

        let TelemetryRecord::Error(error) = &events(&sink)[0] else {
            panic!("expected error");
        };
        assert_eq!(error.error, "cannot open <path>");
        assert_eq!(error.context["attempt"], 1);
    }

    #[test]
    fn failing_sink_is_swallowed() {
        let tracker = Tracker::new(FailingSink);
        tracker.on_mount("Shell");
        tracker.on_error("x", "y", Value::Null);
    }

    #[test]
    fn panicking_sink_is_swallowed() {
        let tracker = Tracker::new(PanickingSink);
        tracker.on_click("approve", Value::Null);
        tracker.on_error("x", "y", Value::Null);
    }

    #[test]
    fn disabled_tracker_does_nothing() {
        let tracker = Tracker::default();
        tracker.on_mount("Shell");
    }
}
