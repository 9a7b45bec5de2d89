//! Composition engine: assembles multi-resource tasks from template
//! families.
//!
//! A [`TemplateFamily`] is an ordered list of template keys expressing
//! dependency order (a network before its subnetwork before the
//! firewall). Construction of a [`TaskBank`] asserts that order: every
//! member's declared `requires` must be covered by the `provides` of
//! strictly earlier members. The assertion runs at build time against
//! the declarations, never by scanning builder behavior, so the
//! dependency graph stays auditable.
//!
//! Composition itself is sequential and single-threaded within one task:
//! builders run in declared order, each seeing a read-only snapshot of
//! the shared values published so far. Nothing crosses task boundaries;
//! independent compositions may run concurrently with no coordination.

use std::collections::{HashMap, HashSet};

use rand::{RngExt, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{CompositionError, TemplateError};
use crate::model::{DeployTask, TaskSpec, SCHEMA_VERSION};
use crate::naming::pools;
use crate::resources;
use crate::template::{pick_naming_rule, TemplateContext, TemplateRegistry};
use crate::validation;

/// Provisioning engine tag stamped on composed tasks.
const ENGINE: &str = "terraform";
/// Provider tag stamped on composed tasks.
const PROVIDER: &str = "gcp";

/// An ordered family of templates composed into one task.
#[derive(Debug, Clone)]
pub struct TemplateFamily {
    /// Family name; becomes the task spec's `kind` label.
    pub name: String,
    /// Template keys in dependency order.
    pub members: Vec<String>,
    /// Non-negative selection weight.
    pub weight: f64,
}

impl TemplateFamily {
    pub fn new(name: impl Into<String>, members: &[&str], weight: f64) -> Self {
        Self {
            name: name.into(),
            members: members.iter().map(|m| m.to_string()).collect(),
            weight,
        }
    }
}

/// A validated pool of families ready to compose tasks.
#[derive(Debug)]
pub struct TaskBank {
    registry: TemplateRegistry,
    families: Vec<TemplateFamily>,
}

impl TaskBank {
    /// Builds a bank from a registry and family pool, asserting every
    /// family's provider/consumer ordering.
    pub fn new(
        registry: TemplateRegistry,
        families: Vec<TemplateFamily>,
    ) -> Result<Self, CompositionError> {
        if families.is_empty() {
            return Err(CompositionError::NoFamilies);
        }
        for family in &families {
            validate_family(&registry, family)?;
        }
        Ok(Self { registry, families })
    }

    /// The bank with all built-in templates and families.
    pub fn builtin() -> Result<Self, CompositionError> {
        let mut registry = TemplateRegistry::new();
        resources::register_builtin(&mut registry)?;

        let mut families: Vec<TemplateFamily> = [
            "storage_bucket",
            "service_account",
            "secret_manager_secret",
            "artifact_registry_repository",
            "scheduler_job",
            "logging_sink",
            "custom_role",
            "compute_network",
            "pubsub_topic",
            "dns_managed_zone",
        ]
        .into_iter()
        .map(|key| {
            let weight = registry.get(key).map(|t| t.weight).unwrap_or(1.0);
            TemplateFamily::new(key, &[key], weight)
        })
        .collect();

        families.push(TemplateFamily::new(
            "network_stack",
            &[
                "compute_network",
                "compute_subnetwork",
                "compute_firewall",
                "compute_instance",
            ],
            1.5,
        ));
        families.push(TemplateFamily::new(
            "pubsub_pair",
            &["pubsub_topic", "pubsub_subscription"],
            1.25,
        ));
        families.push(TemplateFamily::new(
            "dns_pair",
            &["dns_managed_zone", "dns_record_set"],
            1.25,
        ));
        families.push(TemplateFamily::new(
            "bucket_with_sink",
            &["storage_bucket", "logging_sink"],
            1.0,
        ));

        Self::new(registry, families)
    }

    /// Registered families.
    pub fn families(&self) -> &[TemplateFamily] {
        &self.families
    }

    /// Composes a task with ambient randomness.
    pub fn compose(&self, validator_sa: &str) -> Result<DeployTask, CompositionError> {
        let mut rng = ChaCha8Rng::from_rng(&mut rand::rng());
        let task_id = Uuid::new_v4().to_string();
        self.compose_with(&mut rng, task_id, validator_sa, 1, usize::MAX)
    }

    /// Composes a reproducible task: the same seed yields an identical
    /// [`DeployTask`] apart from nothing.
    pub fn compose_seeded(
        &self,
        validator_sa: &str,
        seed: u64,
    ) -> Result<DeployTask, CompositionError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let task_id = Uuid::from_u128(rng.random::<u128>()).to_string();
        self.compose_with(&mut rng, task_id, validator_sa, 1, usize::MAX)
    }

    /// Composes a task whose family size lies in the requested
    /// resource-count range.
    pub fn compose_sized(
        &self,
        validator_sa: &str,
        min_resources: usize,
        max_resources: usize,
    ) -> Result<DeployTask, CompositionError> {
        let mut rng = ChaCha8Rng::from_rng(&mut rand::rng());
        let task_id = Uuid::new_v4().to_string();
        self.compose_with(&mut rng, task_id, validator_sa, min_resources, max_resources)
    }

    fn compose_with(
        &self,
        rng: &mut ChaCha8Rng,
        task_id: String,
        validator_sa: &str,
        min_resources: usize,
        max_resources: usize,
    ) -> Result<DeployTask, CompositionError> {
        let family = self.pick_family(rng, min_resources, max_resources)?;
        let nonce = pools::new_suffix(rng, 16);

        let mut shared: HashMap<String, Value> = HashMap::new();
        let mut invariants = Vec::new();
        let mut prompt_hints = Vec::new();

        for member in &family.members {
            let template =
                self.registry
                    .get(member)
                    .ok_or_else(|| CompositionError::UnknownTemplate {
                        family: family.name.clone(),
                        template: member.clone(),
                    })?;

            let naming_rule = pick_naming_rule(template, rng);
            let instance = {
                let mut ctx =
                    TemplateContext::new(rng, &nonce, naming_rule, &template.key, &shared);
                (template.builder)(&mut ctx)?
            };
            debug!(
                template = %template.key,
                naming_rule = naming_rule.tag(),
                invariants = instance.invariants.len(),
                "template built"
            );

            for (key, value) in instance.shared_values {
                if !template.provides.contains(&key) {
                    return Err(TemplateError::UndeclaredSharedValue {
                        template: template.key.clone(),
                        key,
                    }
                    .into());
                }
                shared.insert(key, value);
            }
            prompt_hints.extend(template.base_hints.iter().cloned());
            prompt_hints.extend(instance.prompt_hints);
            invariants.extend(instance.invariants);
        }

        if invariants.is_empty() {
            return Err(CompositionError::EmptyTask(family.name.clone()));
        }
        for invariant in &invariants {
            let Some(entry) = validation::entry(&invariant.resource_type) else {
                return Err(CompositionError::UnknownResourceType(
                    invariant.resource_type.clone(),
                ));
            };
            for field in invariant.match_fields.keys() {
                if !entry.fields.contains(&field.as_str()) {
                    return Err(CompositionError::UnrecognizedField {
                        resource_type: invariant.resource_type.clone(),
                        field: field.clone(),
                    });
                }
            }
        }

        info!(
            family = %family.name,
            task_id = %task_id,
            invariants = invariants.len(),
            "composed task"
        );
        Ok(DeployTask {
            engine: ENGINE.to_string(),
            provider: PROVIDER.to_string(),
            validator_sa: validator_sa.to_string(),
            spec: TaskSpec {
                version: SCHEMA_VERSION.to_string(),
                task_id,
                nonce,
                kind: family.name.clone(),
                invariants,
            },
            prompt_hints,
        })
    }

    fn pick_family(
        &self,
        rng: &mut ChaCha8Rng,
        min_resources: usize,
        max_resources: usize,
    ) -> Result<&TemplateFamily, CompositionError> {
        let eligible: Vec<&TemplateFamily> = self
            .families
            .iter()
            .filter(|f| (min_resources..=max_resources).contains(&f.members.len()))
            .collect();
        if eligible.is_empty() {
            return Err(CompositionError::NoFamilies);
        }

        let total: f64 = eligible.iter().map(|f| f.weight).sum();
        if total <= 0.0 {
            return Ok(eligible[rng.random_range(0..eligible.len())]);
        }
        let roll = rng.random::<f64>() * total;
        let mut cumulative = 0.0;
        for &family in &eligible {
            cumulative += family.weight;
            // Strict comparison: a zero-weight family never owns any
            // part of the interval, even at roll == 0.0.
            if roll < cumulative {
                return Ok(family);
            }
        }
        Ok(eligible[eligible.len() - 1])
    }
}

fn validate_family(
    registry: &TemplateRegistry,
    family: &TemplateFamily,
) -> Result<(), CompositionError> {
    if family.members.is_empty() {
        return Err(CompositionError::EmptyFamily(family.name.clone()));
    }
    let mut provided: HashSet<&str> = HashSet::new();
    for member in &family.members {
        let template = registry
            .get(member)
            .ok_or_else(|| CompositionError::UnknownTemplate {
                family: family.name.clone(),
                template: member.clone(),
            })?;
        for key in &template.requires {
            if !provided.contains(key.as_str()) {
                return Err(CompositionError::DependencyOrder {
                    family: family.name.clone(),
                    template: member.clone(),
                    key: key.clone(),
                });
            }
        }
        provided.extend(template.provides.iter().map(String::as_str));
    }
    Ok(())
}
