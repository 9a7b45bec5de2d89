//! DNS family: managed zone and record set.

use serde_json::json;

use crate::error::TemplateError;
use crate::model::{ComparisonRule, Invariant};
use crate::naming::{pools, seeded};
use crate::template::{ResourceInstance, ResourceTemplate, TemplateContext};

fn build_zone(ctx: &mut TemplateContext<'_>) -> Result<ResourceInstance, TemplateError> {
    let name = seeded::dns_zone_name(ctx.suffix());
    let dns_name = format!("{}.example.com.", pools::dns_label(ctx.rng, 4, 10));

    let invariant = Invariant::new("google_dns_managed_zone")
        .field("values.name", name.as_str())
        .field("values.dns_name", dns_name.as_str())
        .rule("values.name", ctx.naming_rule);

    let mut instance = ResourceInstance::default();
    instance.prompt_hints.push(format!(
        "Create a DNS managed zone whose name {} `{}` for DNS name {}.",
        ctx.naming_rule.qualifier_phrase(),
        name,
        dns_name
    ));
    instance.invariants.push(invariant);
    instance.shared_values.insert(
        "dns_zone".to_string(),
        json!({ "name": name, "dns_name": dns_name }),
    );
    Ok(instance)
}

fn build_record(ctx: &mut TemplateContext<'_>) -> Result<ResourceInstance, TemplateError> {
    let zone = ctx.require_shared_str("dns_zone", "name")?;
    let zone_dns_name = ctx.require_shared_str("dns_zone", "dns_name")?;
    let record_type = pools::dns_record_type(ctx.rng);
    let ttl = pools::dns_record_ttl(ctx.rng);
    let rrdatas = pools::dns_record_data(record_type, ctx.rng);
    let record_name = format!("{}.{}", pools::dns_label(ctx.rng, 4, 10), zone_dns_name);

    let invariant = Invariant::new("google_dns_record_set")
        .field("values.name", record_name.as_str())
        .field("values.type", record_type)
        .field("values.ttl", ttl)
        .field("values.managed_zone", zone.as_str())
        .field("values.rrdatas", json!(rrdatas));

    let mut instance = ResourceInstance::default();
    instance.prompt_hints.push(format!(
        "Create a {record_type} record `{record_name}` (TTL {ttl}) in zone `{zone}` \
         with data {rrdatas:?}."
    ));
    instance.invariants.push(invariant);
    instance
        .shared_values
        .insert("dns_record".to_string(), json!({ "name": record_name }));
    Ok(instance)
}

pub fn templates() -> Vec<ResourceTemplate> {
    vec![
        ResourceTemplate::new("dns_managed_zone", "DNS managed zone", build_zone)
            .provides(&["dns_zone"])
            .with_naming_rules(&[
                ComparisonRule::ExactMatch,
                ComparisonRule::StartsWith,
                ComparisonRule::EndsWith,
            ]),
        // Record names embed the zone's dns_name, so only exact matching
        // is meaningful here.
        ResourceTemplate::new("dns_record_set", "DNS record", build_record)
            .provides(&["dns_record"])
            .requires(&["dns_zone"]),
    ]
}
