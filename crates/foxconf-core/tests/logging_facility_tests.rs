#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use foxconf_core::logging_facility::test_capture::init_test_capture;
use foxconf_core::{install, log_op_end, log_op_error, log_op_start, marshal, parse_document};
use foxconf_core::{ErrorKind, SubsystemError};
use foxconf_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_ADDRESS, FIELD_COMPONENT, FIELD_DURATION_MS,
    FIELD_ERR_CODE, FIELD_ERR_KIND, FIELD_RESOURCE_COUNT, FIELD_RESOURCE_TYPE,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = SubsystemError::InvalidEnumValue {
        attribute: "acquisition-strategy".to_string(),
        value: "PARALLEL".to_string(),
        allowed: "SEQUENTIAL".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one error event");
    let event = &events[0];
    assert_eq!(event.event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(event.err_code(), Some("ERR_INVALID_ENUM_VALUE"));
    assert_eq!(event.field(FIELD_ERR_CODE), event.err_code());
    assert_eq!(
        event.field(FIELD_ERR_KIND),
        Some(format!("{:?}", ErrorKind::InvalidEnumValue).as_str())
    );
}

#[test]
fn test_parse_logs_operation_count() {
    // GIVEN the capture layer
    let capture = init_test_capture();

    // WHEN parsing a document with four engines
    parse_document(common::ENGINES_AND_PROPERTIES).unwrap();

    // THEN an end event records five operations
    let found = capture
        .events_for_op("parse_document")
        .iter()
        .any(|e| e.is_boundary("parse_document", EVENT_END) && e.op_count() == Some(5));
    assert!(found, "parse_document end event with op_count=5 not captured");
}

#[test]
fn test_apply_failure_logs_error_boundary() {
    // GIVEN the capture layer
    let capture = init_test_capture();

    // WHEN installing a document with duplicate engine names
    install(common::DUPLICATE_ENGINE_NAMES).unwrap_err();

    // THEN the applier logs an error event with the duplicate code
    let found = capture.events_for_op("apply_operations").iter().any(|e| {
        e.is_boundary("apply_operations", EVENT_END_ERROR)
            && e.err_code() == Some("ERR_DUPLICATE_RESOURCE")
            && e.field(FIELD_ADDRESS) == Some("subsystem=fox-platform/process-engine=__test")
    });
    assert!(found, "apply_operations error event not captured");
}

#[test]
fn test_marshal_logs_start_and_end() {
    let capture = init_test_capture();

    let tree = install(common::SINGLE_ENGINE).unwrap();
    marshal(&tree).unwrap();

    capture.assert_event_exists("marshal", EVENT_START);
    capture.assert_event_exists("marshal", EVENT_END);
}

#[test]
fn test_apply_logs_schema_keyed_fields() {
    // GIVEN the capture layer
    let capture = init_test_capture();

    // WHEN installing a single engine
    install(common::SINGLE_ENGINE).unwrap();

    // THEN per-resource and end events use the canonical field keys
    let events = capture.events_for_op("apply_operations");
    assert!(events.iter().any(|e| {
        e.field(FIELD_ADDRESS) == Some("subsystem=fox-platform/process-engine=__default")
            && e.field(FIELD_RESOURCE_TYPE) == Some("process-engine")
    }));
    assert!(events.iter().any(|e| {
        e.is_boundary("apply_operations", EVENT_END)
            && e.field(FIELD_RESOURCE_COUNT) == Some("2")
            && e.field(FIELD_DURATION_MS).is_some()
            && e.field(FIELD_COMPONENT) == Some("foxconf_core::apply")
    }));
}
