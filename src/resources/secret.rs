//! Secret Manager template.

use serde_json::json;

use crate::error::TemplateError;
use crate::model::{ComparisonRule, Invariant};
use crate::naming::seeded;
use crate::template::{ResourceInstance, ResourceTemplate, TemplateContext};

fn build_secret(ctx: &mut TemplateContext<'_>) -> Result<ResourceInstance, TemplateError> {
    let secret_id = seeded::secret_id(ctx.suffix());
    // The payload is re-derivable from the nonce, so the validator can
    // check the stored version without persisting the plaintext.
    let payload = seeded::secret_payload(ctx.nonce);

    let invariant = Invariant::new("google_secret_manager_secret")
        .field("values.secret_id", secret_id.as_str())
        .rule("values.secret_id", ctx.naming_rule);

    let mut instance = ResourceInstance::default();
    instance.prompt_hints.push(format!(
        "Create a secret whose id {} `{}` and store this exact payload in its first version: {}",
        ctx.naming_rule.qualifier_phrase(),
        secret_id,
        payload
    ));
    instance.invariants.push(invariant);
    instance
        .shared_values
        .insert("secret".to_string(), json!({ "secret_id": secret_id }));
    Ok(instance)
}

pub fn templates() -> Vec<ResourceTemplate> {
    vec![
        ResourceTemplate::new("secret_manager_secret", "secret", build_secret)
            .provides(&["secret"])
            .with_naming_rules(&[
                ComparisonRule::ExactMatch,
                ComparisonRule::StartsWith,
                ComparisonRule::EndsWith,
            ]),
    ]
}
