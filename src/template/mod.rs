//! Resource templates and the template registry.
//!
//! A [`ResourceTemplate`] pairs a pure builder function with the metadata
//! the composition engine needs: the shared-value keys it publishes
//! (`provides`), the keys it consumes (`requires`), a selection weight
//! and the comparison rules allowed for the resource's primary name
//! field. Registration happens once at startup through
//! [`TemplateRegistry`]; the registered set is immutable afterwards.
//!
//! Builders must read but never write [`TemplateContext::shared`],
//! consume randomness only from the supplied stream, perform no I/O and
//! be deterministic in the stream's state and the nonce.

use std::collections::HashMap;

use rand::{Rng, RngExt};
use rand_chacha::ChaCha8Rng;
use serde_json::Value;

use crate::error::TemplateError;
use crate::model::ComparisonRule;

/// A pure builder: context in, resource instance out.
pub type BuilderFn = fn(&mut TemplateContext<'_>) -> Result<ResourceInstance, TemplateError>;

/// Per-invocation context handed to a builder.
///
/// Transient: scoped to one builder call within one composition.
pub struct TemplateContext<'a> {
    /// Seeded random source owned by the enclosing composition.
    pub rng: &'a mut ChaCha8Rng,
    /// Seed material for this task; deterministic identifiers derive
    /// from `nonce` (usually via [`TemplateContext::suffix`]).
    pub nonce: &'a str,
    /// Comparison rule picked for this resource's primary name field.
    pub naming_rule: ComparisonRule,
    template_key: &'a str,
    shared: &'a HashMap<String, Value>,
}

impl<'a> TemplateContext<'a> {
    pub(crate) fn new(
        rng: &'a mut ChaCha8Rng,
        nonce: &'a str,
        naming_rule: ComparisonRule,
        template_key: &'a str,
        shared: &'a HashMap<String, Value>,
    ) -> Self {
        Self {
            rng,
            nonce,
            naming_rule,
            template_key,
            shared,
        }
    }

    /// Short suffix derived from the nonce, used to key deterministic
    /// identifier streams.
    pub fn suffix(&self) -> &str {
        &self.nonce[..self.nonce.len().min(8)]
    }

    /// Reads a shared value published by an earlier builder, if any.
    pub fn shared(&self, key: &str) -> Option<&Value> {
        self.shared.get(key)
    }

    /// Reads a shared value an earlier builder is contractually required
    /// to have published.
    ///
    /// The composition engine guarantees providers run before consumers;
    /// a miss here is a fatal contract violation, never a grading outcome.
    pub fn require_shared(&self, key: &str) -> Result<&Value, TemplateError> {
        self.shared
            .get(key)
            .ok_or_else(|| TemplateError::UnpublishedSharedValue {
                template: self.template_key.to_string(),
                key: key.to_string(),
            })
    }

    /// Convenience accessor for a string field inside a shared object.
    pub fn require_shared_str(&self, key: &str, field: &str) -> Result<String, TemplateError> {
        let value = self.require_shared(key)?;
        value
            .get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| TemplateError::UnpublishedSharedValue {
                template: self.template_key.to_string(),
                key: format!("{key}.{field}"),
            })
    }
}

/// Output of one builder invocation.
#[derive(Debug, Default)]
pub struct ResourceInstance {
    /// Invariants contributed to the task spec.
    pub invariants: Vec<crate::model::Invariant>,
    /// Human-readable requirement strings for the instruction renderer.
    pub prompt_hints: Vec<String>,
    /// New shared-value entries published for later builders.
    pub shared_values: HashMap<String, Value>,
}

/// A registered resource template.
#[derive(Clone)]
pub struct ResourceTemplate {
    /// Unique registry key, e.g. `storage_bucket`.
    pub key: String,
    /// Human-oriented kind label, e.g. `storage bucket`.
    pub kind: String,
    /// Shared-value keys this template publishes.
    pub provides: Vec<String>,
    /// Shared-value keys this template consumes; makes provider/consumer
    /// ordering auditable at family build time.
    pub requires: Vec<String>,
    /// The pure builder function.
    pub builder: BuilderFn,
    /// Static description strings merged into the prompt hints.
    pub base_hints: Vec<String>,
    /// Non-negative selection weight.
    pub weight: f64,
    /// Allowed comparison rules for the primary name field; non-empty.
    pub naming_rules: Vec<ComparisonRule>,
}

impl std::fmt::Debug for ResourceTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceTemplate")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("provides", &self.provides)
            .field("requires", &self.requires)
            .field("weight", &self.weight)
            .field("naming_rules", &self.naming_rules)
            .finish()
    }
}

impl ResourceTemplate {
    /// Creates a template with default weight 1.0 and exact-match naming.
    pub fn new(key: impl Into<String>, kind: impl Into<String>, builder: BuilderFn) -> Self {
        Self {
            key: key.into(),
            kind: kind.into(),
            provides: Vec::new(),
            requires: Vec::new(),
            builder,
            base_hints: Vec::new(),
            weight: 1.0,
            naming_rules: vec![ComparisonRule::ExactMatch],
        }
    }

    /// Declares the shared-value keys this template publishes.
    pub fn provides(mut self, keys: &[&str]) -> Self {
        self.provides = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    /// Declares the shared-value keys this template consumes.
    pub fn requires(mut self, keys: &[&str]) -> Self {
        self.requires = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    /// Adds a static description hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.base_hints.push(hint.into());
        self
    }

    /// Sets the selection weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Replaces the allowed naming comparison rules.
    pub fn with_naming_rules(mut self, rules: &[ComparisonRule]) -> Self {
        self.naming_rules = rules.to_vec();
        self
    }

    /// Validates registration-time contract: non-empty naming rules and
    /// a non-negative weight.
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.naming_rules.is_empty() {
            return Err(TemplateError::EmptyNamingRules(self.key.clone()));
        }
        if self.weight < 0.0 {
            return Err(TemplateError::NegativeWeight {
                key: self.key.clone(),
                weight: self.weight,
            });
        }
        Ok(())
    }
}

/// Selects one of the template's allowed naming rules uniformly.
///
/// Applies to the resource's primary name field only; non-name fields
/// always compare exactly.
pub fn pick_naming_rule<R: Rng + ?Sized>(template: &ResourceTemplate, rng: &mut R) -> ComparisonRule {
    template.naming_rules[rng.random_range(0..template.naming_rules.len())]
}

/// Registry mapping template keys to templates.
///
/// Populated once at process start; lookups only afterwards.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    entries: HashMap<String, ResourceTemplate>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a template, validating its contract.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the key is taken, or the template's own
    /// validation error.
    pub fn register(&mut self, template: ResourceTemplate) -> Result<(), TemplateError> {
        template.validate()?;
        if self.entries.contains_key(&template.key) {
            return Err(TemplateError::DuplicateKey(template.key));
        }
        self.entries.insert(template.key.clone(), template);
        Ok(())
    }

    /// Looks up a template by key.
    pub fn get(&self, key: &str) -> Option<&ResourceTemplate> {
        self.entries.get(key)
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over registered templates in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &ResourceTemplate> {
        self.entries.values()
    }
}
