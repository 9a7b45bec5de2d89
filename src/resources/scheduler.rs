//! Cloud Scheduler job template.

use serde_json::json;

use crate::error::TemplateError;
use crate::model::{ComparisonRule, Invariant};
use crate::naming::{pools, seeded};
use crate::template::{ResourceInstance, ResourceTemplate, TemplateContext};

fn build_job(ctx: &mut TemplateContext<'_>) -> Result<ResourceInstance, TemplateError> {
    let name = seeded::scheduler_job_name(ctx.suffix());
    let schedule = pools::scheduler_job_schedule(ctx.rng);
    let (region, _zone) = pools::pick_region_and_zone(ctx.rng);

    let invariant = Invariant::new("google_cloud_scheduler_job")
        .field("values.name", name.as_str())
        .field("values.schedule", schedule)
        .field("values.region", region)
        .rule("values.name", ctx.naming_rule);

    let mut instance = ResourceInstance::default();
    instance.prompt_hints.push(format!(
        "Create a scheduler job whose name {} `{}` in {} running on the cron schedule `{}`.",
        ctx.naming_rule.qualifier_phrase(),
        name,
        region,
        schedule
    ));
    instance.invariants.push(invariant);
    instance
        .shared_values
        .insert("scheduler_job".to_string(), json!({ "name": name }));
    Ok(instance)
}

pub fn templates() -> Vec<ResourceTemplate> {
    vec![
        ResourceTemplate::new("scheduler_job", "scheduler job", build_job)
            .provides(&["scheduler_job"])
            .with_naming_rules(&[
                ComparisonRule::ExactMatch,
                ComparisonRule::StartsWith,
                ComparisonRule::EndsWith,
            ]),
    ]
}
