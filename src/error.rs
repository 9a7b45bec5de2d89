//! Error types for infra-forge operations.
//!
//! Two disjoint classes of failure exist in this crate:
//!
//! - **Contract violations** (these enums): programmer or configuration
//!   errors such as a builder reading an unpublished shared value or a
//!   family running a consumer before its provider. They are raised
//!   immediately and never folded into a grading outcome.
//! - **Data-dependent outcomes**: missing resources, missing fields and
//!   value mismatches. Those are never errors; they are recorded in
//!   [`crate::validation::ValidationResult`] and scored downstream.

use thiserror::Error;

/// Errors raised by resource templates and the template registry.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' already registered")]
    DuplicateKey(String),

    #[error("Template '{0}' declares an empty naming_rules set")]
    EmptyNamingRules(String),

    #[error("Template '{key}' declares a negative selection weight ({weight})")]
    NegativeWeight { key: String, weight: f64 },

    #[error("Builder for '{template}' read shared value '{key}' before any provider published it")]
    UnpublishedSharedValue { template: String, key: String },

    #[error("Builder for '{template}' published shared value '{key}' outside its declared provides set")]
    UndeclaredSharedValue { template: String, key: String },
}

/// Errors raised while assembling families or composing a task.
#[derive(Debug, Error)]
pub enum CompositionError {
    #[error("Family '{0}' has no member templates")]
    EmptyFamily(String),

    #[error("Family '{family}' references unknown template '{template}'")]
    UnknownTemplate { family: String, template: String },

    #[error(
        "Family '{family}': template '{template}' requires shared value '{key}' \
         but no earlier member provides it"
    )]
    DependencyOrder {
        family: String,
        template: String,
        key: String,
    },

    #[error("Task bank has no families to choose from")]
    NoFamilies,

    #[error("Family '{0}' composed a task with no invariants")]
    EmptyTask(String),

    #[error("No validator is registered for resource type '{0}'")]
    UnknownResourceType(String),

    #[error("Validator for '{resource_type}' does not recognize match field '{field}'")]
    UnrecognizedField {
        resource_type: String,
        field: String,
    },

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
}
