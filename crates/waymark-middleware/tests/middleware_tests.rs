//! Integration tests for the selective action-transform middleware.

use serde_json::{json, Value};
use std::borrow::Cow;
use std::sync::Arc;
use waymark_middleware::{
    ActionTransform, ConfigIssue, MemorySink, TransformError,
};

fn deep_upper(node: &Value) -> Value {
    match node {
        Value::Object(entries) => Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.to_uppercase(), deep_upper(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(deep_upper).collect()),
        other => other.clone(),
    }
}

fn upper_case_keys(node: &Value) -> Result<Option<Value>, TransformError> {
    Ok(Some(deep_upper(node)))
}

// ============================================================================
// Dispatch behavior
// ============================================================================

#[test]
fn transforms_the_target_on_dispatched_actions() {
    let mw = ActionTransform::builder("payload", upper_case_keys)
        .build()
        .unwrap();

    let action = json!({"type": "SOME_ACTION", "payload": {"a": true}});
    let out = mw.process_owned(action).unwrap();
    assert_eq!(out["payload"], json!({"A": true}));
    assert_eq!(out["type"], "SOME_ACTION");
}

#[test]
fn transforms_only_allowed_actions_when_specified() {
    let mw = ActionTransform::builder("payload", upper_case_keys)
        .allow(["SOME_ACTION"])
        .build()
        .unwrap();

    let allowed = json!({"type": "SOME_ACTION", "payload": {"a": true}});
    let out = mw.process_owned(allowed).unwrap();
    assert_eq!(out["payload"], json!({"A": true}));

    let other = json!({"type": "SOME_OTHER_ACTION", "payload": {"a": true}});
    let out = mw.process_owned(other.clone()).unwrap();
    assert_eq!(out, other);
}

#[test]
fn ignores_excluded_actions_when_specified() {
    let mw = ActionTransform::builder("payload", upper_case_keys)
        .exclude(["SOME_ACTION"])
        .build()
        .unwrap();

    let excluded = json!({"type": "SOME_ACTION", "payload": {"a": true}});
    let out = mw.process_owned(excluded.clone()).unwrap();
    assert_eq!(out, excluded);

    let other = json!({"type": "SOME_OTHER_ACTION", "payload": {"a": true}});
    let out = mw.process_owned(other).unwrap();
    assert_eq!(out["payload"], json!({"A": true}));
}

#[test]
fn exclusion_overrides_allowance() {
    let sink = Arc::new(MemorySink::new());
    let mw = ActionTransform::builder("payload", upper_case_keys)
        .allow(["SOME_ACTION"])
        .exclude(["SOME_ACTION"])
        .diagnostics(sink.clone())
        .build()
        .unwrap();

    let action = json!({"type": "SOME_ACTION", "payload": {"a": true}});
    let out = mw.process_owned(action.clone()).unwrap();
    assert_eq!(out, action);

    let warnings = sink.messages();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("SOME_ACTION"));
    assert!(warnings[0].contains("exclusion takes precedence"));
}

#[test]
fn no_conflict_emits_no_diagnostics() {
    let sink = Arc::new(MemorySink::new());
    let _mw = ActionTransform::builder("payload", upper_case_keys)
        .allow(["A"])
        .exclude(["B"])
        .diagnostics(sink.clone())
        .build()
        .unwrap();
    assert!(sink.is_empty());
}

#[test]
fn skipped_actions_come_back_borrowed() {
    let mw = ActionTransform::builder("payload", upper_case_keys)
        .allow(["SOME_ACTION"])
        .build()
        .unwrap();

    let action = json!({"type": "SOME_OTHER_ACTION", "payload": {"a": true}});
    let out = mw.process(&action).unwrap();
    assert!(matches!(out, Cow::Borrowed(v) if std::ptr::eq(v, &action)));
}

#[test]
fn actions_without_the_target_pass_through() {
    let mw = ActionTransform::builder("payload.items", upper_case_keys)
        .build()
        .unwrap();

    let action = json!({"type": "SOME_ACTION", "payload": {"a": true}});
    let out = mw.process(&action).unwrap();
    assert!(matches!(out, Cow::Borrowed(_)));
}

#[test]
fn nested_targets_reach_through_brackets() {
    let mw = ActionTransform::builder("payload.items[1]", upper_case_keys)
        .build()
        .unwrap();

    let action = json!({
        "type": "SOME_ACTION",
        "payload": {"items": [{"a": 1}, {"b": 2}]}
    });
    let out = mw.process_owned(action).unwrap();
    assert_eq!(out["payload"]["items"], json!([{"a": 1}, {"B": 2}]));
}

#[test]
fn transform_failures_reach_the_caller() {
    let fail = |_: &Value| -> Result<Option<Value>, TransformError> {
        Err("bad payload".into())
    };
    let mw = ActionTransform::builder("payload", fail).build().unwrap();

    let action = json!({"type": "SOME_ACTION", "payload": {}});
    let err = mw.process(&action).unwrap_err();
    assert_eq!(err.to_string(), "bad payload");
}

// ============================================================================
// Configuration validation
// ============================================================================

#[test]
fn rejects_malformed_targets() {
    for target in ["bad..path", ".leading", "trailing.", "1digit.x", ""] {
        let result = ActionTransform::builder(target, upper_case_keys).build();
        assert!(result.is_err(), "target {target:?} should be rejected");
    }
}

#[test]
fn reports_all_problems_together() {
    let err = ActionTransform::builder(".1bad.", upper_case_keys)
        .build()
        .unwrap_err();
    assert_eq!(err.issues().len(), 3);
    assert!(err
        .issues()
        .iter()
        .any(|i| matches!(i, ConfigIssue::InvalidTargetSegment { segment } if segment == "1bad")));
}

// ============================================================================
// Dispatch-chain wiring
// ============================================================================

#[test]
fn forwards_into_a_next_stage() {
    // The middleware slots in front of whatever consumes actions next.
    let mw = ActionTransform::builder("payload", upper_case_keys)
        .allow(["SOME_ACTION"])
        .build()
        .unwrap();

    let mut seen = Vec::new();
    let mut next = |action: Value| seen.push(action);

    for action in [
        json!({"type": "SOME_ACTION", "payload": {"a": 1}}),
        json!({"type": "UNRELATED", "payload": {"a": 1}}),
    ] {
        next(mw.process_owned(action).unwrap());
    }

    assert_eq!(seen[0]["payload"], json!({"A": 1}));
    assert_eq!(seen[1]["payload"], json!({"a": 1}));
}
