//! Core data model shared by the generation and validation flows.
//!
//! A [`TaskSpec`] is the machine-checkable description of one deployment
//! challenge: an ordered list of [`Invariant`]s plus the seed material
//! (`nonce`) used while generating it. Specs are built once by the
//! composition engine and never mutated afterwards; the instruction
//! renderer and the validation engine only read them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Schema tag stamped on every generated task spec.
pub const SCHEMA_VERSION: &str = "v0";

/// How an expected field value is compared against the provisioned value.
///
/// Comparisons happen after both sides are reduced to their final
/// `/`-delimited segment, so a fully-qualified provisioned path such as
/// `projects/p/topics/my-topic` compares against the bare `my-topic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonRule {
    ExactMatch,
    StartsWith,
    EndsWith,
}

impl ComparisonRule {
    /// The literal qualifier phrase the prompt renderer must emit for
    /// this rule.
    pub fn qualifier_phrase(&self) -> &'static str {
        match self {
            ComparisonRule::ExactMatch => "equals",
            ComparisonRule::StartsWith => "starts with",
            ComparisonRule::EndsWith => "ends with",
        }
    }

    /// Snake-case tag used in error strings and serialized form.
    pub fn tag(&self) -> &'static str {
        match self {
            ComparisonRule::ExactMatch => "exact_match",
            ComparisonRule::StartsWith => "starts_with",
            ComparisonRule::EndsWith => "ends_with",
        }
    }
}

impl Default for ComparisonRule {
    fn default() -> Self {
        ComparisonRule::ExactMatch
    }
}

/// One expected resource and the field values it must carry.
///
/// `match_fields` maps dotted attribute paths (e.g. `values.name`) to
/// expected values. `comparison_rule` optionally overrides the rule for
/// individual paths; any path absent from it compares with
/// [`ComparisonRule::ExactMatch`]. Every `comparison_rule` key must name
/// an existing `match_fields` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invariant {
    /// Domain resource-type tag, e.g. `google_storage_bucket`.
    pub resource_type: String,
    /// Expected attribute values keyed by dotted path.
    #[serde(rename = "match")]
    pub match_fields: BTreeMap<String, Value>,
    /// Per-path comparison rule overrides.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub comparison_rule: BTreeMap<String, ComparisonRule>,
}

impl Invariant {
    /// Creates an invariant with no expected fields yet.
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            match_fields: BTreeMap::new(),
            comparison_rule: BTreeMap::new(),
        }
    }

    /// Adds an expected field value.
    pub fn field(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.match_fields.insert(path.into(), value.into());
        self
    }

    /// Overrides the comparison rule for an already-declared field.
    ///
    /// # Panics
    ///
    /// Panics if `path` has not been declared via [`Invariant::field`];
    /// a rule on an unknown field is a builder bug, not a grading outcome.
    pub fn rule(mut self, path: impl Into<String>, rule: ComparisonRule) -> Self {
        let path = path.into();
        assert!(
            self.match_fields.contains_key(&path),
            "comparison rule targets undeclared match field '{path}'"
        );
        if rule != ComparisonRule::ExactMatch {
            self.comparison_rule.insert(path, rule);
        }
        self
    }

    /// The comparison rule in effect for a field path.
    pub fn rule_for(&self, path: &str) -> ComparisonRule {
        self.comparison_rule
            .get(path)
            .copied()
            .unwrap_or_default()
    }
}

/// A complete machine-checkable task specification.
///
/// Built once per generation request; immutable afterwards by convention
/// (no mutating methods are provided and no engine code writes through it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Schema tag, currently [`SCHEMA_VERSION`].
    pub version: String,
    /// Opaque unique identifier for this task.
    pub task_id: String,
    /// Seed material threaded through deterministic name generation.
    pub nonce: String,
    /// Human-oriented label for the composed family.
    pub kind: String,
    /// Ordered, non-empty invariant sequence.
    pub invariants: Vec<Invariant>,
}

/// A task spec paired with the deployment context handed to requesters.
///
/// The engine/provider tags and the validating principal are stamped by
/// the composition engine; `prompt_hints` carries the merged human-readable
/// requirement strings produced by the builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployTask {
    /// Provisioning engine expected to produce the snapshot.
    pub engine: String,
    /// Cloud provider the templates target.
    pub provider: String,
    /// Identity allowed to inspect the deployment for grading.
    pub validator_sa: String,
    /// The machine-checkable specification.
    pub spec: TaskSpec,
    /// Merged requirement hints for the instruction renderer.
    pub prompt_hints: Vec<String>,
}
