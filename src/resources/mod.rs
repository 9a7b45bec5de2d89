//! Built-in resource template families.
//!
//! One module per resource family; each exposes a `templates()` function
//! returning its [`ResourceTemplate`] entries. [`register_builtin`]
//! installs every family into a registry at startup.

pub mod artifact_registry;
pub mod bucket;
pub mod custom_role;
pub mod dns;
pub mod logging;
pub mod network;
pub mod pubsub;
pub mod scheduler;
pub mod secret;
pub mod service_account;

use crate::error::TemplateError;
use crate::template::{ResourceTemplate, TemplateRegistry};

/// Registers every built-in template.
pub fn register_builtin(registry: &mut TemplateRegistry) -> Result<(), TemplateError> {
    let groups: Vec<Vec<ResourceTemplate>> = vec![
        bucket::templates(),
        network::templates(),
        service_account::templates(),
        pubsub::templates(),
        secret::templates(),
        artifact_registry::templates(),
        scheduler::templates(),
        logging::templates(),
        dns::templates(),
        custom_role::templates(),
    ];
    for group in groups {
        for template in group {
            registry.register(template)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_templates_all_register() {
        let mut registry = TemplateRegistry::new();
        register_builtin(&mut registry).expect("builtin templates must be valid");
        assert!(registry.len() >= 14);
        assert!(registry.get("storage_bucket").is_some());
        assert!(registry.get("compute_instance").is_some());
        assert!(registry.get("pubsub_subscription").is_some());
    }

    #[test]
    fn builtin_requires_reference_declared_provides() {
        let mut registry = TemplateRegistry::new();
        register_builtin(&mut registry).expect("register");

        let all_provides: Vec<String> = registry
            .iter()
            .flat_map(|t| t.provides.iter().cloned())
            .collect();
        for template in registry.iter() {
            for key in &template.requires {
                assert!(
                    all_provides.contains(key),
                    "template '{}' requires '{}' which no template provides",
                    template.key,
                    key
                );
            }
        }
    }
}
