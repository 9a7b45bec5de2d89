//! Artifact Registry repository template.

use serde_json::json;

use crate::error::TemplateError;
use crate::model::{ComparisonRule, Invariant};
use crate::naming::{pools, seeded};
use crate::template::{ResourceInstance, ResourceTemplate, TemplateContext};

fn build_repository(ctx: &mut TemplateContext<'_>) -> Result<ResourceInstance, TemplateError> {
    let repository_id = seeded::artifact_repository_id(ctx.suffix());
    let format = pools::artifact_format(ctx.rng);
    let location = pools::artifact_location(ctx.rng);

    let invariant = Invariant::new("google_artifact_registry_repository")
        .field("values.repository_id", repository_id.as_str())
        .field("values.format", format)
        .field("values.location", location)
        .rule("values.repository_id", ctx.naming_rule);

    let mut instance = ResourceInstance::default();
    instance.prompt_hints.push(format!(
        "Create a {} artifact repository whose id {} `{}` in {}.",
        format,
        ctx.naming_rule.qualifier_phrase(),
        repository_id,
        location
    ));
    instance.invariants.push(invariant);
    instance.shared_values.insert(
        "artifact_repository".to_string(),
        json!({ "repository_id": repository_id, "location": location }),
    );
    Ok(instance)
}

pub fn templates() -> Vec<ResourceTemplate> {
    vec![
        ResourceTemplate::new(
            "artifact_registry_repository",
            "artifact repository",
            build_repository,
        )
        .provides(&["artifact_repository"])
        .with_naming_rules(&[
            ComparisonRule::ExactMatch,
            ComparisonRule::StartsWith,
            ComparisonRule::EndsWith,
        ]),
    ]
}
