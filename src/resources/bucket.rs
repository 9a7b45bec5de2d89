//! Storage bucket template.

use serde_json::json;

use crate::error::TemplateError;
use crate::model::{ComparisonRule, Invariant};
use crate::naming::{pools, seeded};
use crate::template::{ResourceInstance, ResourceTemplate, TemplateContext};

fn build_bucket(ctx: &mut TemplateContext<'_>) -> Result<ResourceInstance, TemplateError> {
    let name = seeded::bucket_name(ctx.suffix());
    let location = pools::bucket_location(ctx.rng);
    let storage_class = pools::bucket_storage_class(ctx.rng);
    let object_name = pools::bucket_object_name(ctx.rng, "txt");

    let invariant = Invariant::new("google_storage_bucket")
        .field("values.name", name.as_str())
        .field("values.location", location)
        .field("values.storage_class", storage_class)
        .rule("values.name", ctx.naming_rule);

    // The object's bucket reference tracks the bucket's naming rule: a
    // requester appending a prefix or suffix to the bucket name reports
    // that extended name here too.
    let object = Invariant::new("google_storage_bucket_object")
        .field("values.name", object_name.as_str())
        .field("values.bucket", name.as_str())
        .rule("values.bucket", ctx.naming_rule);

    let hint = format!(
        "Create a storage bucket whose name {} `{}`, in location {} with storage class {}.",
        ctx.naming_rule.qualifier_phrase(),
        name,
        location,
        storage_class
    );

    let mut instance = ResourceInstance::default();
    instance.invariants.push(invariant);
    instance.invariants.push(object);
    instance.prompt_hints.push(hint);
    instance
        .prompt_hints
        .push(format!("Upload an object named `{object_name}` to that bucket."));
    instance
        .shared_values
        .insert("bucket".to_string(), json!({ "name": name }));
    Ok(instance)
}

pub fn templates() -> Vec<ResourceTemplate> {
    vec![ResourceTemplate::new("storage_bucket", "storage bucket", build_bucket)
        .provides(&["bucket"])
        .with_hint("Expose a standalone bucket other resources can reference.")
        .with_naming_rules(&[
            ComparisonRule::ExactMatch,
            ComparisonRule::StartsWith,
            ComparisonRule::EndsWith,
        ])]
}
