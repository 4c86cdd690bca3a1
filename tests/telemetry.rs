// SPDX-License-Identifier: MPL-2.0
use alitheia_workbench::domain::telemetry::BufferCapacity;
use alitheia_workbench::telemetry::{
    actions, Category, ComponentTracker, ErrorRecord, EventRecord, Props, SinkError,
    TelemetryCollector, TelemetryRecord, TelemetrySink, Tracker,
};
use serde_json::json;
use tempfile::tempdir;

struct Unreachable;

impl TelemetrySink for Unreachable {
    fn record_event(&self, _record: EventRecord) -> Result<(), SinkError> {
        Err(SinkError::Unavailable("collector offline".into()))
    }

    fn record_error(&self, _record: ErrorRecord) -> Result<(), SinkError> {
        panic!("sink crashed");
    }
}

#[test]
fn sink_failures_never_reach_the_caller() {
    let tracker = Tracker::new(Unreachable);

    tracker.on_mount("CaseReview");
    tracker.on_click("approve", json!({ "case_id": "C-1042" }));
    tracker.on_error("load_case", "timeout", json!(null));

    let mut component = ComponentTracker::mount(&tracker, "RulesDesigner");
    component.render();
    component.render();
    drop(component);
}

#[test]
fn review_flow_is_collected_in_order() {
    let mut collector = TelemetryCollector::new(BufferCapacity::default());
    let tracker = Tracker::new(collector.sink());

    {
        let mut review = ComponentTracker::mount(&tracker, "CaseReview");
        review.render();
        review.render();

        let mut props = Props::new();
        props.insert("case_id".into(), json!("C-1042"));
        review.props(props.clone());
        props.insert("case_id".into(), json!("C-1043"));
        review.props(props);

        tracker.on_input("notes", json!({ "length": 12 }));
        tracker.on_submit("decision", json!({ "outcome": "refer" }));
    }

    assert_eq!(collector.process_pending(), 6);
    let recorded: Vec<&str> = collector.records().map(TelemetryRecord::action).collect();
    assert_eq!(
        recorded,
        vec![
            actions::MOUNT,
            actions::RENDER,
            actions::PROPS_CHANGE,
            actions::INPUT,
            actions::SUBMIT,
            actions::UNMOUNT,
        ]
    );

    let props_change = collector
        .records()
        .find_map(|record| match record {
            TelemetryRecord::Event(event) if event.action == actions::PROPS_CHANGE => Some(event),
            _ => None,
        })
        .expect("props change recorded");
    assert_eq!(props_change.category, Category::Render);
    assert_eq!(
        props_change.additional_data["changed"]["case_id"],
        json!({ "before": "C-1042", "after": "C-1043" })
    );
}

#[test]
fn error_text_is_sanitized_before_collection() {
    let mut collector = TelemetryCollector::new(BufferCapacity::default());
    let tracker = Tracker::new(collector.sink());

    tracker.on_error(
        "ehr_import",
        "failed to read /var/lib/ehr/okafor.json for maya@example.com (123-45-6789)",
        json!({ "case_id": "C-1042" }),
    );
    collector.process_pending();

    let Some(TelemetryRecord::Error(error)) = collector.records().next() else {
        panic!("expected an error record");
    };
    assert!(!error.error.contains("/var/lib/ehr"));
    assert!(!error.error.contains("maya@example.com"));
    assert!(!error.error.contains("123-45-6789"));
    assert_eq!(error.context["case_id"], "C-1042");
}

#[test]
fn report_export_writes_summary_and_records() {
    let mut collector = TelemetryCollector::new(BufferCapacity::default());
    let tracker = Tracker::new(collector.sink());
    tracker.on_mount("Shell");
    tracker.on_click("open_case", json!({ "case_id": "C-1044" }));
    tracker.on_error("rule_evaluation", "no decisions", json!(null));
    collector.process_pending();

    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("report.json");
    let written = collector.export_to_file(&path).expect("export succeeds");
    assert_eq!(written, path);

    let content = std::fs::read_to_string(&path).expect("report readable");
    let report: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(report["metadata"]["record_count"], 3);
    assert_eq!(report["summary"]["events"], 2);
    assert_eq!(report["summary"]["errors"], 1);
    assert_eq!(report["records"].as_array().map(Vec::len), Some(3));
}

#[test]
fn disabled_tracker_records_nothing_and_is_silent() {
    let tracker = Tracker::disabled();
    tracker.on_mount("Shell");
    tracker.on_unmount("Shell", 42);
    tracker.on_render("Shell", 9);
}
