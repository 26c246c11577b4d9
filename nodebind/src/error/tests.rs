//! Unit tests for error rendering and aggregation behaviour.

use rstest::rstest;
use std::sync::Arc;

use super::{BindError, ScalarFormatError};
use crate::NodeKind;

#[test]
fn uniquely_owned_single_failure_is_unwrapped() {
    let outcome = BindError::try_aggregate([Arc::new(BindError::hook("Body", "refused"))]);
    assert!(
        matches!(outcome, Some(BindError::Hook { .. })),
        "expected Hook, got {outcome:?}"
    );
}

#[test]
fn shared_single_failure_stays_aggregated() {
    let shared = Arc::new(BindError::options(figment::Error::from("boom")));
    let outcome = BindError::try_aggregate([Arc::clone(&shared)]);
    match outcome {
        Some(BindError::Aggregate(failures)) => {
            assert_eq!(failures.len(), 1);
            assert!(failures.iter().all(|f| Arc::ptr_eq(f, &shared)));
        }
        other => panic!("expected Aggregate, got {other:?}"),
    }
}

#[test]
fn several_failures_render_one_per_line() {
    let missing = BindError::MissingRequiredField {
        target: "Body",
        key: "name".into(),
        path: "Body".into(),
    };
    let tree = BindError::Tree {
        message: "two".into(),
    };
    let Some(BindError::Aggregate(failures)) = BindError::try_aggregate([missing, tree]) else {
        panic!("expected Aggregate");
    };
    assert_eq!(failures.keys().collect::<Vec<_>>(), ["name"]);
    assert_eq!(
        failures.to_string(),
        "- missing non-optional field 'name' on Body at 'Body'\n- invalid configuration tree: two"
    );
}

#[test]
fn no_failures_aggregate_to_nothing() {
    assert!(BindError::try_aggregate(Vec::<BindError>::new()).is_none());
}

#[rstest]
#[case::missing(
    BindError::MissingRequiredField { target: "Body", key: "name".into(), path: "Body".into() },
    "missing non-optional field 'name' on Body at 'Body'"
)]
#[case::kind(
    BindError::KindMismatch {
        key: "Atmosphere".into(),
        expected: NodeKind::Node,
        found: NodeKind::Scalar,
        path: "Body".into(),
    },
    "'Atmosphere' at 'Body' requires a config node but found a scalar"
)]
#[case::scalar(
    BindError::ScalarFormat {
        key: "radius".into(),
        path: "Body/Properties".into(),
        source: ScalarFormatError::new("huge", "f64", "invalid float literal"),
    },
    "invalid value for 'radius' at 'Body/Properties': cannot parse 'huge' as f64: invalid float literal"
)]
fn errors_render_key_and_path(#[case] err: BindError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[test]
fn key_is_reported_for_member_errors() {
    let err = BindError::MissingRequiredField {
        target: "Body",
        key: "name".into(),
        path: "Body".into(),
    };
    assert_eq!(err.key(), Some("name"));
    assert_eq!(BindError::hook("Body", "x").key(), None);
}
