//! Plain-text instruction rendering for composed tasks.
//!
//! Renders a [`DeployTask`] as the human-readable requirement sheet a
//! requester receives. For every expected field the renderer emits the
//! literal qualifier phrase of its comparison rule — "starts with",
//! "ends with" or "equals" — followed by the expected value, so flexible
//! naming rules survive into the text verbatim. Output is deterministic
//! for a given task.

use std::fmt::Write;

use crate::model::DeployTask;
use crate::validation::rules::value_text;

/// Renders the full instruction text for a task.
pub fn render_instructions(task: &DeployTask) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Deployment task {} ({}) — provision with {} on {}.",
        task.spec.task_id, task.spec.kind, task.engine, task.provider
    );
    let _ = writeln!(
        out,
        "Grant read access to the validating principal {}.",
        task.validator_sa
    );

    if !task.prompt_hints.is_empty() {
        let _ = writeln!(out, "\nRequirements:");
        for hint in &task.prompt_hints {
            let _ = writeln!(out, "- {hint}");
        }
    }

    let _ = writeln!(out, "\nExpected resources:");
    for invariant in &task.spec.invariants {
        let _ = writeln!(out, "- {}:", invariant.resource_type);
        for (path, expected) in &invariant.match_fields {
            let rule = invariant.rule_for(path);
            let _ = writeln!(
                out,
                "  - `{path}` {} `{}`",
                rule.qualifier_phrase(),
                value_text(expected)
            );
        }
    }
    out
}
