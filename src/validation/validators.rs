//! Per-resource-type validators and the dispatch table.
//!
//! Each resource type maps to one fixed validator implementation plus
//! the set of match fields it recognizes. Adding a resource type means
//! adding one table entry and (at most) one implementation; the dispatch
//! logic itself never changes. Most types use the generic field-by-field
//! validator; a few refine it by canonicalizing casing on enumerated
//! fields or by checking cross-references with path-segment reduction.

use serde_json::Value;

use crate::model::{ComparisonRule, Invariant};
use crate::validation::rules::{apply_comparison_rule, matches_ref, value_text};
use crate::validation::state::ResourceState;
use crate::validation::ValidationResult;

/// Validator function for one resource type.
pub type ValidatorFn = fn(&Invariant, &ResourceState) -> ValidationResult;

/// Dispatch table entry: the validator plus the fields it recognizes.
pub struct ValidatorEntry {
    pub validate: ValidatorFn,
    pub fields: &'static [&'static str],
}

/// Looks up the dispatch entry for a resource type.
pub fn entry(resource_type: &str) -> Option<ValidatorEntry> {
    let (validate, fields): (ValidatorFn, &'static [&'static str]) = match resource_type {
        "google_storage_bucket" => (
            validate_storage_bucket,
            &["values.name", "values.location", "values.storage_class"],
        ),
        "google_storage_bucket_object" => (validate_default, &["values.name", "values.bucket"]),
        "google_compute_network" => (
            validate_default,
            &["values.name", "values.auto_create_subnetworks"],
        ),
        "google_compute_subnetwork" => (
            validate_default,
            &[
                "values.name",
                "values.ip_cidr_range",
                "values.region",
                "values.network",
            ],
        ),
        "google_compute_firewall" => (
            validate_default,
            &[
                "values.name",
                "values.network",
                "values.direction",
                "values.priority",
                "values.disabled",
            ],
        ),
        "google_compute_instance" => (
            validate_default,
            &[
                "values.name",
                "values.machine_type",
                "values.zone",
                "values.metadata.startup-script",
            ],
        ),
        "google_service_account" => (
            validate_default,
            &[
                "values.account_id",
                "values.display_name",
                "values.description",
            ],
        ),
        "google_pubsub_topic" => (
            validate_default,
            &["values.name", "values.message_retention_duration"],
        ),
        "google_pubsub_subscription" => (
            validate_pubsub_subscription,
            &["values.name", "values.topic", "values.ack_deadline_seconds"],
        ),
        "google_secret_manager_secret" => (validate_default, &["values.secret_id"]),
        "google_artifact_registry_repository" => (
            validate_artifact_registry_repository,
            &["values.repository_id", "values.format", "values.location"],
        ),
        "google_cloud_scheduler_job" => (
            validate_default,
            &["values.name", "values.schedule", "values.region"],
        ),
        "google_logging_project_sink" => {
            (validate_default, &["values.name", "values.filter"])
        }
        "google_dns_managed_zone" => (validate_default, &["values.name", "values.dns_name"]),
        "google_dns_record_set" => (
            validate_dns_record_set,
            &[
                "values.name",
                "values.type",
                "values.ttl",
                "values.managed_zone",
                "values.rrdatas",
            ],
        ),
        "google_project_iam_custom_role" => (
            validate_default,
            &["values.role_id", "values.title", "values.permissions"],
        ),
        _ => return None,
    };
    Some(ValidatorEntry { validate, fields })
}

/// Whether any validator handles this resource type.
pub fn has_validator(resource_type: &str) -> bool {
    entry(resource_type).is_some()
}

fn comparison_error(
    path: &str,
    rule: ComparisonRule,
    expected: &Value,
    actual: Option<&Value>,
) -> String {
    let found = match actual {
        Some(v) => format!("`{}`", value_text(v)),
        None => "missing".to_string(),
    };
    format!(
        "field `{path}` ({}): expected value that {} `{}`, found {found}",
        rule.tag(),
        rule.qualifier_phrase(),
        value_text(expected)
    )
}

/// Field-level canonicalization applied to both expected and actual
/// values before the generic rule runs.
type Canonicalizer = fn(path: &str, value: &Value) -> Value;

fn identity(_path: &str, value: &Value) -> Value {
    value.clone()
}

fn validate_fields(
    invariant: &Invariant,
    resource: &ResourceState,
    canonicalize: Canonicalizer,
) -> ValidationResult {
    let mut errors = Vec::new();
    for (path, expected) in &invariant.match_fields {
        let rule = invariant.rule_for(path);
        let actual = resource.attribute(path);
        let expected_canon = canonicalize(path, expected);
        let actual_canon = actual.map(|v| canonicalize(path, v));
        if !apply_comparison_rule(actual_canon.as_ref(), Some(&expected_canon), rule) {
            errors.push(comparison_error(path, rule, expected, actual));
        }
    }
    ValidationResult::from_errors(errors)
}

/// Generic validator: every match field compared under its rule.
fn validate_default(invariant: &Invariant, resource: &ResourceState) -> ValidationResult {
    validate_fields(invariant, resource, identity)
}

fn uppercase_if(paths: &[&str], path: &str, value: &Value) -> Option<Value> {
    if paths.contains(&path) {
        value.as_str().map(|s| Value::String(s.to_uppercase()))
    } else {
        None
    }
}

/// Buckets: providers may echo location and storage class with different
/// casing; canonicalize to uppercase before comparing.
fn validate_storage_bucket(invariant: &Invariant, resource: &ResourceState) -> ValidationResult {
    fn canon(path: &str, value: &Value) -> Value {
        uppercase_if(&["values.location", "values.storage_class"], path, value)
            .unwrap_or_else(|| value.clone())
    }
    validate_fields(invariant, resource, canon)
}

/// Artifact registry: `format` may come back lowercase and `location`
/// uppercase; fold both to canonical casing.
fn validate_artifact_registry_repository(
    invariant: &Invariant,
    resource: &ResourceState,
) -> ValidationResult {
    fn canon(path: &str, value: &Value) -> Value {
        if path == "values.format" {
            if let Some(s) = value.as_str() {
                return Value::String(s.to_uppercase());
            }
        }
        if path == "values.location" {
            if let Some(s) = value.as_str() {
                return Value::String(s.to_lowercase());
            }
        }
        value.clone()
    }
    validate_fields(invariant, resource, canon)
}

/// Subscriptions: the `topic` field is a cross-reference that providers
/// report as a fully-qualified path; match it by final segment.
fn validate_pubsub_subscription(
    invariant: &Invariant,
    resource: &ResourceState,
) -> ValidationResult {
    let mut errors = Vec::new();
    for (path, expected) in &invariant.match_fields {
        let rule = invariant.rule_for(path);
        let actual = resource.attribute(path);
        let ok = if path == "values.topic" {
            match (actual.and_then(Value::as_str), expected.as_str()) {
                (Some(actual), Some(expected)) => matches_ref(actual, expected),
                _ => false,
            }
        } else {
            apply_comparison_rule(actual, Some(expected), rule)
        };
        if !ok {
            errors.push(comparison_error(path, rule, expected, actual));
        }
    }
    ValidationResult::from_errors(errors)
}

/// DNS record sets: `type` is canonicalized to uppercase and the
/// `managed_zone` cross-reference matches by final segment.
fn validate_dns_record_set(invariant: &Invariant, resource: &ResourceState) -> ValidationResult {
    let mut errors = Vec::new();
    for (path, expected) in &invariant.match_fields {
        let rule = invariant.rule_for(path);
        let actual = resource.attribute(path);
        let ok = if path == "values.managed_zone" {
            match (actual.and_then(Value::as_str), expected.as_str()) {
                (Some(actual), Some(expected)) => matches_ref(actual, expected),
                _ => false,
            }
        } else if path == "values.type" {
            let canon = |v: &Value| {
                v.as_str()
                    .map(|s| Value::String(s.to_uppercase()))
                    .unwrap_or_else(|| v.clone())
            };
            apply_comparison_rule(actual.map(|v| canon(v)).as_ref(), Some(&canon(expected)), rule)
        } else {
            apply_comparison_rule(actual, Some(expected), rule)
        };
        if !ok {
            errors.push(comparison_error(path, rule, expected, actual));
        }
    }
    ValidationResult::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource(resource_type: &str, doc: Value) -> ResourceState {
        ResourceState::new(resource_type, doc)
    }

    #[test]
    fn every_builtin_type_has_an_entry() {
        for resource_type in [
            "google_storage_bucket",
            "google_storage_bucket_object",
            "google_compute_network",
            "google_compute_subnetwork",
            "google_compute_firewall",
            "google_compute_instance",
            "google_service_account",
            "google_pubsub_topic",
            "google_pubsub_subscription",
            "google_secret_manager_secret",
            "google_artifact_registry_repository",
            "google_cloud_scheduler_job",
            "google_logging_project_sink",
            "google_dns_managed_zone",
            "google_dns_record_set",
            "google_project_iam_custom_role",
        ] {
            assert!(has_validator(resource_type), "no entry for {resource_type}");
        }
        assert!(!has_validator("google_unknown_resource"));
    }

    #[test]
    fn default_validator_passes_on_match() {
        let inv = Invariant::new("google_storage_bucket")
            .field("values.name", "my-bucket")
            .field("values.location", "US")
            .rule("values.name", ComparisonRule::StartsWith);
        let res = resource(
            "google_storage_bucket",
            json!({ "values": { "name": "my-bucket-user1-xyz", "location": "US" } }),
        );
        let result = (entry("google_storage_bucket").expect("entry").validate)(&inv, &res);
        assert!(result.passed, "errors: {:?}", result.errors);
    }

    #[test]
    fn default_validator_reports_prefix_mismatch() {
        let inv = Invariant::new("google_storage_bucket")
            .field("values.name", "my-bucket")
            .rule("values.name", ComparisonRule::StartsWith);
        let res = resource(
            "google_storage_bucket",
            json!({ "values": { "name": "other-bucket-xyz" } }),
        );
        let result = validate_default(&inv, &res);
        assert!(!result.passed);
        assert_eq!(result.errors.len(), 1);
        let error = &result.errors[0];
        assert!(error.contains("values.name"));
        assert!(error.contains("starts_with"));
        assert!(error.contains("my-bucket"));
        assert!(error.contains("other-bucket-xyz"));
    }

    #[test]
    fn bucket_object_tracks_extended_bucket_name() {
        let inv = Invariant::new("google_storage_bucket_object")
            .field("values.name", "notes-1a2b.txt")
            .field("values.bucket", "my-bucket")
            .rule("values.bucket", ComparisonRule::StartsWith);
        let res = resource(
            "google_storage_bucket_object",
            json!({ "values": { "name": "notes-1a2b.txt", "bucket": "my-bucket-miner1" } }),
        );
        let result = validate_default(&inv, &res);
        assert!(result.passed, "errors: {:?}", result.errors);
    }

    #[test]
    fn missing_field_is_reported_not_raised() {
        let inv = Invariant::new("google_storage_bucket").field("values.location", "US");
        let res = resource("google_storage_bucket", json!({ "values": {} }));
        let result = validate_default(&inv, &res);
        assert!(!result.passed);
        assert!(result.errors[0].contains("missing"));
    }

    #[test]
    fn mixed_rules_use_default_exact_for_unlisted_fields() {
        let inv = Invariant::new("google_storage_bucket")
            .field("values.name", "my-bucket")
            .field("values.location", "US")
            .field("values.storage_class", "STANDARD")
            .rule("values.name", ComparisonRule::StartsWith);
        let res = resource(
            "google_storage_bucket",
            json!({ "values": {
                "name": "my-bucket-prod-123",
                "location": "US",
                "storage_class": "STANDARD",
            } }),
        );
        let result = validate_storage_bucket(&inv, &res);
        assert!(result.passed, "errors: {:?}", result.errors);
    }

    #[test]
    fn artifact_registry_canonicalizes_casing() {
        let inv = Invariant::new("google_artifact_registry_repository")
            .field("values.repository_id", "my-repo")
            .field("values.format", "DOCKER")
            .field("values.location", "us-central1")
            .rule("values.repository_id", ComparisonRule::StartsWith);
        // Provider echoes format lowercase and location uppercase.
        let res = resource(
            "google_artifact_registry_repository",
            json!({ "values": {
                "repository_id": "my-repo-suffix123",
                "format": "docker",
                "location": "US-CENTRAL1",
            } }),
        );
        let result = validate_artifact_registry_repository(&inv, &res);
        assert!(result.passed, "errors: {:?}", result.errors);
    }

    #[test]
    fn subscription_topic_matches_full_path_reference() {
        let inv = Invariant::new("google_pubsub_subscription")
            .field("values.name", "my-sub")
            .field("values.topic", "some-topic")
            .rule("values.name", ComparisonRule::EndsWith);
        let res = resource(
            "google_pubsub_subscription",
            json!({ "values": {
                "name": "projects/my-project-123/subscriptions/prefix-my-sub",
                "topic": "projects/my-project-123/topics/some-topic",
            } }),
        );
        let result = validate_pubsub_subscription(&inv, &res);
        assert!(result.passed, "errors: {:?}", result.errors);
    }

    #[test]
    fn dns_record_checks_zone_reference_and_type_casing() {
        let inv = Invariant::new("google_dns_record_set")
            .field("values.name", "www.apex.example.com.")
            .field("values.type", "A")
            .field("values.ttl", 300)
            .field("values.managed_zone", "zone-a")
            .field("values.rrdatas", json!(["192.0.2.7"]));
        let res = resource(
            "google_dns_record_set",
            json!({ "values": {
                "name": "www.apex.example.com.",
                "type": "a",
                "ttl": 300,
                "managed_zone": "projects/p/managedZones/zone-a",
                "rrdatas": ["192.0.2.7"],
            } }),
        );
        let result = validate_dns_record_set(&inv, &res);
        assert!(result.passed, "errors: {:?}", result.errors);
    }
}
