//! infra-forge: synthetic infrastructure-deployment task generator and
//! grader.
//!
//! This library deterministically composes multi-resource deployment
//! challenges and later validates an externally-produced provisioned
//! state snapshot against them:
//!
//! - [`naming`] generates grammar-valid identifiers and low-risk
//!   operational values, either ambiently or from per-key deterministic
//!   streams.
//! - [`template`] and [`resources`] define the resource templates and
//!   their builders.
//! - [`compose`] assembles templates into one [`model::TaskSpec`],
//!   threading shared values through a family in dependency order.
//! - [`validation`] resolves attribute paths in a state snapshot and
//!   applies exact/prefix/suffix comparison rules per resource type.
//! - [`instructions`] renders a composed task as requester-facing text.
//!
//! Generation and validation share only the data model; both are pure,
//! synchronous and reproducible.

pub mod compose;
pub mod error;
pub mod instructions;
pub mod model;
pub mod naming;
pub mod resources;
pub mod template;
pub mod validation;

pub use compose::{TaskBank, TemplateFamily};
pub use error::{CompositionError, TemplateError};
pub use model::{ComparisonRule, DeployTask, Invariant, TaskSpec, SCHEMA_VERSION};
pub use validation::{validate_spec, StateSnapshot, ValidationReport, ValidationResult};
