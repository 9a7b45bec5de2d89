//! Pub/Sub family: topic and subscription.

use serde_json::json;

use crate::error::TemplateError;
use crate::model::{ComparisonRule, Invariant};
use crate::naming::{pools, seeded};
use crate::template::{ResourceInstance, ResourceTemplate, TemplateContext};

fn build_topic(ctx: &mut TemplateContext<'_>) -> Result<ResourceInstance, TemplateError> {
    let name = seeded::pubsub_topic_id(ctx.suffix());
    let retention = pools::pubsub_retention_window(ctx.rng);

    let invariant = Invariant::new("google_pubsub_topic")
        .field("values.name", name.as_str())
        .field("values.message_retention_duration", retention)
        .rule("values.name", ctx.naming_rule);

    let mut instance = ResourceInstance::default();
    instance.prompt_hints.push(format!(
        "Create a Pub/Sub topic whose name {} `{}` with message retention {}.",
        ctx.naming_rule.qualifier_phrase(),
        name,
        retention
    ));
    instance.invariants.push(invariant);
    instance
        .shared_values
        .insert("pubsub_topic".to_string(), json!({ "name": name }));
    Ok(instance)
}

fn build_subscription(ctx: &mut TemplateContext<'_>) -> Result<ResourceInstance, TemplateError> {
    let topic = ctx.require_shared_str("pubsub_topic", "name")?;
    let name = seeded::pubsub_subscription_id(ctx.suffix());
    let ack_deadline = pools::pubsub_ack_deadline(ctx.rng);

    let invariant = Invariant::new("google_pubsub_subscription")
        .field("values.name", name.as_str())
        .field("values.topic", topic.as_str())
        .field("values.ack_deadline_seconds", ack_deadline)
        .rule("values.name", ctx.naming_rule);

    let mut instance = ResourceInstance::default();
    instance.prompt_hints.push(format!(
        "Create a subscription whose name {} `{}` on topic `{}` with a {}s ack deadline.",
        ctx.naming_rule.qualifier_phrase(),
        name,
        topic,
        ack_deadline
    ));
    instance.invariants.push(invariant);
    instance
        .shared_values
        .insert("pubsub_subscription".to_string(), json!({ "name": name }));
    Ok(instance)
}

pub fn templates() -> Vec<ResourceTemplate> {
    let flexible = [
        ComparisonRule::ExactMatch,
        ComparisonRule::StartsWith,
        ComparisonRule::EndsWith,
    ];
    vec![
        ResourceTemplate::new("pubsub_topic", "Pub/Sub topic", build_topic)
            .provides(&["pubsub_topic"])
            .with_naming_rules(&flexible),
        ResourceTemplate::new("pubsub_subscription", "Pub/Sub subscription", build_subscription)
            .provides(&["pubsub_subscription"])
            .requires(&["pubsub_topic"])
            .with_naming_rules(&flexible),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    #[test]
    fn subscription_references_published_topic() {
        let mut shared = HashMap::new();
        shared.insert("pubsub_topic".to_string(), json!({ "name": "topic-xyz" }));
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut ctx = TemplateContext::new(
            &mut rng,
            "cafebabe00000000",
            ComparisonRule::ExactMatch,
            "pubsub_subscription",
            &shared,
        );
        let instance = build_subscription(&mut ctx).expect("build");
        assert_eq!(
            instance.invariants[0].match_fields["values.topic"],
            json!("topic-xyz")
        );
    }

    #[test]
    fn subscription_without_topic_is_fatal() {
        let shared = HashMap::new();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut ctx = TemplateContext::new(
            &mut rng,
            "cafebabe00000000",
            ComparisonRule::ExactMatch,
            "pubsub_subscription",
            &shared,
        );
        assert!(build_subscription(&mut ctx).is_err());
    }
}
