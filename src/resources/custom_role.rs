//! Custom IAM role template.

use serde_json::json;

use crate::error::TemplateError;
use crate::model::{ComparisonRule, Invariant};
use crate::naming::{pools, seeded};
use crate::template::{ResourceInstance, ResourceTemplate, TemplateContext};

fn build_role(ctx: &mut TemplateContext<'_>) -> Result<ResourceInstance, TemplateError> {
    let role_id = seeded::custom_role_id(ctx.suffix());
    let permissions = pools::custom_role_permissions(ctx.rng);
    let title = pools::random_label(ctx.rng, 8, 16);

    let invariant = Invariant::new("google_project_iam_custom_role")
        .field("values.role_id", role_id.as_str())
        .field("values.title", title.as_str())
        .field("values.permissions", json!(permissions))
        .rule("values.role_id", ctx.naming_rule);

    let mut instance = ResourceInstance::default();
    instance.prompt_hints.push(format!(
        "Create a custom role whose id {} `{}` titled {} granting exactly: {}.",
        ctx.naming_rule.qualifier_phrase(),
        role_id,
        title,
        permissions.join(", ")
    ));
    instance.invariants.push(invariant);
    instance
        .shared_values
        .insert("custom_role".to_string(), json!({ "role_id": role_id }));
    Ok(instance)
}

pub fn templates() -> Vec<ResourceTemplate> {
    vec![
        ResourceTemplate::new("custom_role", "custom IAM role", build_role)
            .provides(&["custom_role"])
            .with_naming_rules(&[
                ComparisonRule::ExactMatch,
                ComparisonRule::StartsWith,
                ComparisonRule::EndsWith,
            ]),
    ]
}
