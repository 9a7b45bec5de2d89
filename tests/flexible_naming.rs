//! Integration tests for flexible naming validation: starts_with,
//! ends_with and exact_match rules, path-segment reduction and
//! instruction rendering.

use infra_forge::instructions::render_instructions;
use infra_forge::model::{ComparisonRule, DeployTask, Invariant, TaskSpec, SCHEMA_VERSION};
use infra_forge::validation::{validate_spec, StateSnapshot};
use serde_json::json;

fn spec_with(invariants: Vec<Invariant>) -> TaskSpec {
    TaskSpec {
        version: SCHEMA_VERSION.to_string(),
        task_id: "test-flexible-naming".to_string(),
        nonce: "abcdef0123456789".to_string(),
        kind: "test".to_string(),
        invariants,
    }
}

fn snapshot(resources: serde_json::Value) -> StateSnapshot {
    StateSnapshot::from_value(&json!({ "resources": resources }))
}

#[test]
fn bucket_starts_with_passes_on_prefixed_name() {
    let spec = spec_with(vec![Invariant::new("google_storage_bucket")
        .field("values.name", "my-bucket")
        .rule("values.name", ComparisonRule::StartsWith)]);

    let good = snapshot(json!([
        { "type": "google_storage_bucket", "values": { "name": "my-bucket-miner1-xyz" } }
    ]));
    assert!(validate_spec(&spec, &good).passed);

    let bad = snapshot(json!([
        { "type": "google_storage_bucket", "values": { "name": "other-bucket-xyz" } }
    ]));
    let report = validate_spec(&spec, &bad);
    assert!(!report.passed);
    assert!(report.results[0].errors[0].contains("starts with"));
}

#[test]
fn subscription_ends_with_reduces_full_path_first() {
    // Provisioned state reports the fully-qualified subscription path;
    // the invariant holds only the bare suffix.
    let spec = spec_with(vec![Invariant::new("google_pubsub_subscription")
        .field("values.name", "my-sub")
        .rule("values.name", ComparisonRule::EndsWith)]);

    let state = snapshot(json!([
        { "type": "google_pubsub_subscription",
          "values": { "name": "projects/p/subscriptions/prefix-my-sub" } }
    ]));
    assert!(validate_spec(&spec, &state).passed);
}

#[test]
fn topic_starts_with_on_full_path() {
    let spec = spec_with(vec![Invariant::new("google_pubsub_topic")
        .field("values.name", "my-topic")
        .rule("values.name", ComparisonRule::StartsWith)]);

    let state = snapshot(json!([
        { "type": "google_pubsub_topic",
          "values": { "name": "projects/my-project-123/topics/my-topic-suffix" } }
    ]));
    assert!(validate_spec(&spec, &state).passed);
}

#[test]
fn secret_ends_with_on_full_path() {
    let spec = spec_with(vec![Invariant::new("google_secret_manager_secret")
        .field("values.secret_id", "app-secret")
        .rule("values.secret_id", ComparisonRule::EndsWith)]);

    let state = snapshot(json!([
        { "type": "google_secret_manager_secret",
          "values": { "secret_id": "projects/my-project/secrets/prefix-app-secret" } }
    ]));
    assert!(validate_spec(&spec, &state).passed);
}

#[test]
fn mixed_rules_default_to_exact_for_unlisted_fields() {
    let spec = spec_with(vec![Invariant::new("google_storage_bucket")
        .field("values.name", "my-bucket")
        .field("values.location", "US")
        .field("values.storage_class", "STANDARD")
        .rule("values.name", ComparisonRule::StartsWith)]);

    let state = snapshot(json!([
        { "type": "google_storage_bucket",
          "values": { "name": "my-bucket-prod-123", "location": "US", "storage_class": "STANDARD" } }
    ]));
    assert!(validate_spec(&spec, &state).passed);

    let wrong_location = snapshot(json!([
        { "type": "google_storage_bucket",
          "values": { "name": "my-bucket-prod-123", "location": "EU", "storage_class": "STANDARD" } }
    ]));
    assert!(!validate_spec(&spec, &wrong_location).passed);
}

#[test]
fn artifact_repository_tolerates_provider_casing() {
    let spec = spec_with(vec![Invariant::new("google_artifact_registry_repository")
        .field("values.repository_id", "my-repo")
        .field("values.format", "DOCKER")
        .field("values.location", "us-central1")
        .rule("values.repository_id", ComparisonRule::StartsWith)]);

    let state = snapshot(json!([
        { "type": "google_artifact_registry_repository",
          "values": {
              "repository_id": "my-repo-suffix123",
              "name": "projects/p/locations/us-central1/repositories/my-repo-suffix123",
              "format": "docker",
              "location": "US-CENTRAL1",
          } }
    ]));
    assert!(validate_spec(&spec, &state).passed);
}

#[test]
fn rendered_instructions_carry_all_three_qualifiers() {
    let spec = spec_with(vec![
        Invariant::new("google_storage_bucket")
            .field("values.name", "bucket-start")
            .rule("values.name", ComparisonRule::StartsWith),
        Invariant::new("google_compute_instance")
            .field("values.name", "vm-ade66267")
            .field("values.zone", "europe-west1-b")
            .field("values.machine_type", "e2-medium")
            .rule("values.name", ComparisonRule::EndsWith),
    ]);
    let task = DeployTask {
        engine: "terraform".to_string(),
        provider: "gcp".to_string(),
        validator_sa: "validator@example.com".to_string(),
        spec,
        prompt_hints: Vec::new(),
    };

    let text = render_instructions(&task);
    assert!(text.contains("starts with"));
    assert!(text.contains("bucket-start"));
    assert!(text.contains("ends with"));
    assert!(text.contains("vm-ade66267"));
    // Plain fields say "equals", never imply exact naming for the rest.
    assert!(text.contains("`values.zone` equals `europe-west1-b`"));
}
