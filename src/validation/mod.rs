//! Validation engine: grades a state snapshot against a task spec.
//!
//! Given one [`TaskSpec`](crate::model::TaskSpec) and one
//! [`StateSnapshot`], the engine produces one [`ValidationResult`] per
//! invariant plus an aggregate pass/fail, without mutating either input.
//! Repeated evaluation of the same pair yields byte-identical output.
//!
//! Data-dependent findings (missing resource, missing field, value
//! mismatch) are always recorded as error strings in the result; the
//! engine never raises for them. How many failures are tolerable is a
//! grading-policy decision made downstream.

pub mod rules;
pub mod state;
pub mod validators;

pub use rules::{apply_comparison_rule, final_segment, matches_ref};
pub use state::{ResourceState, StateSnapshot};
pub use validators::{entry, has_validator, ValidatorEntry};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::TaskSpec;

/// Outcome of checking one invariant against the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether every field comparison passed.
    pub passed: bool,
    /// One human-readable entry per failed comparison, in field order.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// A passing result.
    pub fn pass() -> Self {
        Self {
            passed: true,
            errors: Vec::new(),
        }
    }

    /// Builds a result from collected errors; passes iff none.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            passed: errors.is_empty(),
            errors,
        }
    }
}

/// Aggregate outcome for a whole task spec.
///
/// `results` is ordered like the spec's invariant sequence; `passed` is
/// true iff every invariant passed. Intended for direct serialization
/// into a grading report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub passed: bool,
    pub results: Vec<ValidationResult>,
}

/// Validates every invariant of `spec` against `snapshot`.
///
/// Resource lookup scans the snapshot for resources whose `type` tag
/// equals the invariant's `resource_type`. A missing resource yields a
/// distinct "not found" error and no field comparison. When several
/// resources share the type, the invariant passes if any candidate
/// satisfies it; otherwise the first candidate's errors are reported.
pub fn validate_spec(spec: &TaskSpec, snapshot: &StateSnapshot) -> ValidationReport {
    let mut results = Vec::with_capacity(spec.invariants.len());
    for invariant in &spec.invariants {
        let result = validate_invariant(invariant, snapshot);
        debug!(
            resource_type = %invariant.resource_type,
            passed = result.passed,
            "invariant checked"
        );
        results.push(result);
    }
    let passed = results.iter().all(|r| r.passed);
    ValidationReport { passed, results }
}

fn validate_invariant(
    invariant: &crate::model::Invariant,
    snapshot: &StateSnapshot,
) -> ValidationResult {
    let Some(dispatch) = validators::entry(&invariant.resource_type) else {
        // Composition guarantees known types; an unknown type in a spec
        // that bypassed composition is still a graded finding here.
        return ValidationResult::from_errors(vec![format!(
            "no validator registered for resource type `{}`",
            invariant.resource_type
        )]);
    };

    let candidates = snapshot.resources_of_type(&invariant.resource_type);
    if candidates.is_empty() {
        return ValidationResult::from_errors(vec![format!(
            "resource of type `{}` not found in state snapshot",
            invariant.resource_type
        )]);
    }

    let mut first_failure: Option<ValidationResult> = None;
    for candidate in candidates {
        let result = (dispatch.validate)(invariant, candidate);
        if result.passed {
            return result;
        }
        first_failure.get_or_insert(result);
    }
    first_failure.unwrap_or_else(ValidationResult::pass)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComparisonRule, Invariant, SCHEMA_VERSION};
    use serde_json::json;

    fn spec_with(invariants: Vec<Invariant>) -> TaskSpec {
        TaskSpec {
            version: SCHEMA_VERSION.to_string(),
            task_id: "task-0001".to_string(),
            nonce: "abcdef0123456789".to_string(),
            kind: "test".to_string(),
            invariants,
        }
    }

    fn snapshot_with(resources: serde_json::Value) -> StateSnapshot {
        StateSnapshot::from_value(&json!({ "resources": resources }))
    }

    #[test]
    fn missing_resource_fails_without_field_comparison() {
        let spec = spec_with(vec![Invariant::new("google_storage_bucket")
            .field("values.name", "my-bucket")]);
        let report = validate_spec(&spec, &snapshot_with(json!([])));
        assert!(!report.passed);
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].errors.len(), 1);
        assert!(report.results[0].errors[0].contains("not found"));
    }

    #[test]
    fn aggregate_passes_iff_all_invariants_pass() {
        let spec = spec_with(vec![
            Invariant::new("google_storage_bucket").field("values.name", "bucket-a"),
            Invariant::new("google_pubsub_topic").field("values.name", "topic-a"),
        ]);
        let snapshot = snapshot_with(json!([
            { "type": "google_storage_bucket", "values": { "name": "bucket-a" } },
            { "type": "google_pubsub_topic", "values": { "name": "topic-b" } },
        ]));
        let report = validate_spec(&spec, &snapshot);
        assert!(!report.passed);
        assert!(report.results[0].passed);
        assert!(!report.results[1].passed);
    }

    #[test]
    fn multiple_candidates_pass_if_any_matches() {
        let spec = spec_with(vec![Invariant::new("google_storage_bucket")
            .field("values.name", "bucket-b")]);
        let snapshot = snapshot_with(json!([
            { "type": "google_storage_bucket", "values": { "name": "bucket-a" } },
            { "type": "google_storage_bucket", "values": { "name": "bucket-b" } },
        ]));
        assert!(validate_spec(&spec, &snapshot).passed);
    }

    #[test]
    fn validation_is_idempotent() {
        let spec = spec_with(vec![Invariant::new("google_storage_bucket")
            .field("values.name", "my-bucket")
            .field("values.location", "US")
            .rule("values.name", ComparisonRule::StartsWith)]);
        let snapshot = snapshot_with(json!([
            { "type": "google_storage_bucket",
              "values": { "name": "wrong-name", "location": "EU" } },
        ]));
        let first = validate_spec(&spec, &snapshot);
        let second = validate_spec(&spec, &snapshot);
        let first_json = serde_json::to_string(&first).expect("serialize");
        let second_json = serde_json::to_string(&second).expect("serialize");
        assert_eq!(first_json, second_json);
    }

    #[test]
    fn report_serializes_for_direct_reporting() {
        let report = ValidationReport {
            passed: false,
            results: vec![ValidationResult::from_errors(vec!["boom".to_string()])],
        };
        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["passed"], json!(false));
        assert_eq!(json["results"][0]["errors"][0], json!("boom"));
    }
}
