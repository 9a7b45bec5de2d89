//! Logging sink template.

use serde_json::json;

use crate::error::TemplateError;
use crate::model::{ComparisonRule, Invariant};
use crate::naming::{pools, seeded};
use crate::template::{ResourceInstance, ResourceTemplate, TemplateContext};

fn build_sink(ctx: &mut TemplateContext<'_>) -> Result<ResourceInstance, TemplateError> {
    let name = seeded::logging_sink_name(ctx.suffix());
    let filter = pools::logging_filter(ctx.rng);
    // Sinks need a destination; reuse the bucket when the family provides
    // one so the whole task shares a slug.
    let destination_hint = match ctx.shared("bucket") {
        Some(bucket) => bucket
            .get("name")
            .and_then(serde_json::Value::as_str)
            .map(|b| format!(" routing to storage bucket `{b}`"))
            .unwrap_or_default(),
        None => String::new(),
    };

    let invariant = Invariant::new("google_logging_project_sink")
        .field("values.name", name.as_str())
        .field("values.filter", filter)
        .rule("values.name", ctx.naming_rule);

    let mut instance = ResourceInstance::default();
    instance.prompt_hints.push(format!(
        "Create a log sink whose name {} `{}` with filter {}{}.",
        ctx.naming_rule.qualifier_phrase(),
        name,
        filter,
        destination_hint
    ));
    instance.invariants.push(invariant);
    instance
        .shared_values
        .insert("logging_sink".to_string(), json!({ "name": name }));
    Ok(instance)
}

pub fn templates() -> Vec<ResourceTemplate> {
    vec![
        ResourceTemplate::new("logging_sink", "log sink", build_sink)
            .provides(&["logging_sink"])
            .with_naming_rules(&[
                ComparisonRule::ExactMatch,
                ComparisonRule::StartsWith,
                ComparisonRule::EndsWith,
            ]),
    ]
}
