#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use trackdiff_core::errors::{CompareError, DocumentRole, ExErrorKind};
use trackdiff_core::logging_facility::test_capture::init_test_capture;
use trackdiff_core::trackdiff_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use trackdiff_core::{log_op_end, log_op_error, log_op_start};
use trackdiff_core::{Compare, CompareOptions, Document};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let events = capture.events();
    let start_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START))
        .collect();

    assert!(
        !start_events.is_empty(),
        "Should have captured at least one start event"
    );
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = CompareError::MissingDocument {
        role: DocumentRole::Old,
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");

    assert_eq!(error_event.field("err.code"), Some("ERR_MISSING_DOCUMENT"));
    assert_eq!(
        error_event.field("err.kind"),
        Some(format!("{:?}", ExErrorKind::MissingDocument).as_str())
    );
}

#[test]
fn test_log_macros_with_multiple_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_macros_fields_unique_4";

    log_op_start!(op_name, run_id = "r-123", author = 7u32);

    let events = capture.events();
    let start_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name))
        .expect("Should have start event");

    assert_eq!(start_event.field("run_id"), Some("r-123"));
    assert_eq!(start_event.field("author"), Some("7"));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();

    // This should panic because no such event exists
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_compare_run_owns_single_start_and_end() {
    let capture = init_test_capture();
    let mut compare = Compare::documents(
        Arc::new(Document::from_plain("alpha beta")),
        Arc::new(Document::from_plain("alpha gamma")),
        CompareOptions::default(),
    );
    let run_id = compare.run_id().as_str().to_string();

    assert!(compare.run());

    let events = capture.events_with("run_id", &run_id);
    let starts = events
        .iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_START))
        .count();
    let ends = events
        .iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .count();
    assert_eq!(starts, 1, "Should have exactly one start event");
    assert_eq!(ends, 1, "Should have exactly one end event");

    let end = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END))
        .unwrap();
    assert_eq!(end.op.as_deref(), Some("compare"));
    assert_eq!(end.field("aborted"), Some("false"));
}

#[test]
fn test_compare_precondition_failure_logs_end_error() {
    let capture = init_test_capture();
    let mut compare = Compare::new(
        Some(Arc::new(Document::from_plain("a"))),
        None,
        Some(Document::default()),
        CompareOptions::default(),
    );
    let run_id = compare.run_id().as_str().to_string();

    assert!(!compare.run());

    let events = capture.events_with("run_id", &run_id);
    let error_event = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event for this run");
    assert_eq!(error_event.field("err.code"), Some("ERR_MISSING_DOCUMENT"));
    assert!(events
        .iter()
        .all(|e| e.event.as_deref() != Some(EVENT_END)));
}

#[test]
fn test_aborted_run_logs_end_not_error() {
    let capture = init_test_capture();
    let mut compare = Compare::documents(
        Arc::new(Document::from_plain("abc")),
        Arc::new(Document::from_plain("xyz")),
        CompareOptions::default(),
    );
    compare.cancel_token().cancel();
    let run_id = compare.run_id().as_str().to_string();

    assert!(!compare.run());

    let events = capture.events_with("run_id", &run_id);
    let end = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END))
        .expect("Should have end event for this run");
    assert_eq!(end.field("aborted"), Some("true"));
}
