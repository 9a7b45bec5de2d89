//! Compute network family: network, subnetwork, firewall, instance.
//!
//! The four templates share one nonce-derived slug through the shared
//! value mapping: the network publishes its name, the subnetwork
//! publishes its name plus the region/zone choice, and the firewall and
//! instance consume them. Family order must run providers first.

use serde_json::json;

use crate::error::TemplateError;
use crate::model::{ComparisonRule, Invariant};
use crate::naming::grammar::NameGrammar;
use crate::naming::{pools, seeded};
use crate::template::{ResourceInstance, ResourceTemplate, TemplateContext};

fn build_network(ctx: &mut TemplateContext<'_>) -> Result<ResourceInstance, TemplateError> {
    let name = NameGrammar::rfc1035(6, 18).generate(ctx.rng);

    let invariant = Invariant::new("google_compute_network")
        .field("values.name", name.as_str())
        .field("values.auto_create_subnetworks", false)
        .rule("values.name", ctx.naming_rule);

    let mut instance = ResourceInstance::default();
    instance.prompt_hints.push(format!(
        "Create a VPC network whose name {} `{}` with auto-created subnetworks disabled.",
        ctx.naming_rule.qualifier_phrase(),
        name
    ));
    instance.invariants.push(invariant);
    instance
        .shared_values
        .insert("network".to_string(), json!({ "name": name }));
    Ok(instance)
}

fn build_subnetwork(ctx: &mut TemplateContext<'_>) -> Result<ResourceInstance, TemplateError> {
    let network = ctx.require_shared_str("network", "name")?;
    let name = NameGrammar::rfc1035(6, 18).generate(ctx.rng);
    let (region, zone) = pools::pick_region_and_zone(ctx.rng);
    let cidr = pools::random_cidr_block(ctx.rng);

    let invariant = Invariant::new("google_compute_subnetwork")
        .field("values.name", name.as_str())
        .field("values.ip_cidr_range", cidr.as_str())
        .field("values.region", region)
        .field("values.network", network.as_str())
        .rule("values.name", ctx.naming_rule);

    let mut instance = ResourceInstance::default();
    instance.prompt_hints.push(format!(
        "Create subnetwork `{name}` in region {region} with CIDR {cidr} inside network `{network}`."
    ));
    instance.invariants.push(invariant);
    instance.shared_values.insert(
        "subnetwork".to_string(),
        json!({ "name": name, "region": region, "zone": zone, "cidr": cidr }),
    );
    Ok(instance)
}

fn build_firewall(ctx: &mut TemplateContext<'_>) -> Result<ResourceInstance, TemplateError> {
    let network = ctx.require_shared_str("network", "name")?;
    let name = NameGrammar::rfc1035(6, 18).generate(ctx.rng);
    let profile = pools::random_firewall_profile(ctx.rng);

    let invariant = Invariant::new("google_compute_firewall")
        .field("values.name", name.as_str())
        .field("values.network", network.as_str())
        .field("values.direction", profile.direction)
        .field("values.priority", profile.priority)
        .field("values.disabled", profile.disabled)
        .rule("values.name", ctx.naming_rule);

    let ports = if profile.allow_ports.is_empty() {
        String::new()
    } else {
        format!(" on port(s) {}", profile.allow_ports.join(", "))
    };
    let mut instance = ResourceInstance::default();
    instance.prompt_hints.push(format!(
        "Create firewall rule `{}` in network `{}` ({} priority {}) allowing {}{}.",
        name, network, profile.direction, profile.priority, profile.allow_protocol, ports
    ));
    instance.invariants.push(invariant);
    instance
        .shared_values
        .insert("firewall".to_string(), json!({ "name": name }));
    Ok(instance)
}

fn build_instance(ctx: &mut TemplateContext<'_>) -> Result<ResourceInstance, TemplateError> {
    let _network = ctx.require_shared_str("network", "name")?;
    let subnetwork = ctx.require_shared_str("subnetwork", "name")?;
    let zone = ctx.require_shared_str("subnetwork", "zone")?;
    let name = NameGrammar::rfc1035(6, 18).generate(ctx.rng);
    let machine_type = pools::pick_machine_type(ctx.rng);
    let token = seeded::instance_token(ctx.nonce);
    let script = pools::startup_script(&token, ctx.rng);

    let invariant = Invariant::new("google_compute_instance")
        .field("values.name", name.as_str())
        .field("values.machine_type", machine_type)
        .field("values.zone", zone.as_str())
        .field("values.metadata.startup-script", script.as_str())
        .rule("values.name", ctx.naming_rule);

    let mut instance = ResourceInstance::default();
    instance.prompt_hints.push(format!(
        "Create a {machine_type} instance whose name {} `{}` in zone {zone}, attached to \
         subnetwork `{subnetwork}`, with exactly this startup script:\n{script}",
        ctx.naming_rule.qualifier_phrase(),
        name
    ));
    instance.invariants.push(invariant);
    instance
        .shared_values
        .insert("instance".to_string(), json!({ "name": name, "zone": zone }));
    Ok(instance)
}

pub fn templates() -> Vec<ResourceTemplate> {
    vec![
        ResourceTemplate::new("compute_network", "VPC network", build_network)
            .provides(&["network"])
            .with_hint("Provide the network the rest of the stack attaches to."),
        ResourceTemplate::new("compute_subnetwork", "subnetwork", build_subnetwork)
            .provides(&["subnetwork"])
            .requires(&["network"]),
        ResourceTemplate::new("compute_firewall", "firewall rule", build_firewall)
            .provides(&["firewall"])
            .requires(&["network"]),
        ResourceTemplate::new("compute_instance", "virtual machine", build_instance)
            .provides(&["instance"])
            .requires(&["network", "subnetwork"])
            .with_naming_rules(&[
                ComparisonRule::ExactMatch,
                ComparisonRule::StartsWith,
                ComparisonRule::EndsWith,
            ]),
    ]
}
