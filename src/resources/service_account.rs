//! Service account template.

use serde_json::json;

use crate::error::TemplateError;
use crate::model::{ComparisonRule, Invariant};
use crate::naming::{pools, seeded};
use crate::template::{ResourceInstance, ResourceTemplate, TemplateContext};

fn build_service_account(ctx: &mut TemplateContext<'_>) -> Result<ResourceInstance, TemplateError> {
    let account_id = seeded::service_account_id(ctx.suffix());
    let display_name = pools::random_label(ctx.rng, 8, 16);
    // Keep the description stable and short; no resource-type hints.
    let description = pools::random_label(ctx.rng, 10, 18);

    let invariant = Invariant::new("google_service_account")
        .field("values.account_id", account_id.as_str())
        .field("values.display_name", display_name.as_str())
        .field("values.description", description.as_str())
        .rule("values.account_id", ctx.naming_rule);

    let mut instance = ResourceInstance::default();
    instance.prompt_hints.push(format!(
        "Create a standalone service account whose id {} `{}`, named {} with description {}.",
        ctx.naming_rule.qualifier_phrase(),
        account_id,
        display_name,
        description
    ));
    instance.invariants.push(invariant);
    instance.shared_values.insert(
        "service_account".to_string(),
        json!({
            "account_id": account_id,
            "display_name": display_name,
            "description": description,
        }),
    );
    Ok(instance)
}

pub fn templates() -> Vec<ResourceTemplate> {
    vec![
        ResourceTemplate::new("service_account", "service account", build_service_account)
            .provides(&["service_account"])
            .with_hint("Expose a fresh service account for future bindings.")
            .with_naming_rules(&[
                ComparisonRule::StartsWith,
                ComparisonRule::EndsWith,
                ComparisonRule::ExactMatch,
            ]),
    ]
}
