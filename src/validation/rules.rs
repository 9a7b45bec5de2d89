//! Comparison rule application and path-segment reduction.
//!
//! Provisioned state often reports fully-qualified resource paths
//! (`projects/p/topics/my-topic`) where the invariant holds the bare
//! name, or vice versa. Both sides of every comparison are therefore
//! reduced to their final `/`-delimited segment before the rule applies.
//! The reduction is symmetric and applies to all three rules, including
//! `exact_match`; tests pin this down as verified behavior.

use serde_json::Value;

use crate::model::ComparisonRule;

/// Reduces a value to its final `/`-delimited segment.
pub fn final_segment(value: &str) -> &str {
    value.rsplit('/').next().unwrap_or(value)
}

/// Canonical text form of a JSON value for comparison: strings verbatim,
/// everything else via JSON rendering.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Applies a comparison rule to optional actual/expected values.
///
/// Missing semantics: `exact_match` passes when both sides are missing
/// and fails on any other missing combination; `starts_with` and
/// `ends_with` fail whenever either side is missing. Non-string values
/// under `exact_match` compare structurally.
pub fn apply_comparison_rule(
    actual: Option<&Value>,
    expected: Option<&Value>,
    rule: ComparisonRule,
) -> bool {
    match (actual, expected) {
        (None, None) => rule == ComparisonRule::ExactMatch,
        (None, Some(_)) | (Some(_), None) => false,
        (Some(actual), Some(expected)) => {
            // Structural equality for non-string pairs; path reduction is
            // only meaningful on strings.
            if rule == ComparisonRule::ExactMatch
                && !(actual.is_string() && expected.is_string())
            {
                return actual == expected;
            }
            let actual = value_text(actual);
            let expected = value_text(expected);
            let actual = final_segment(&actual);
            let expected = final_segment(&expected);
            match rule {
                ComparisonRule::ExactMatch => actual == expected,
                ComparisonRule::StartsWith => actual.starts_with(expected),
                ComparisonRule::EndsWith => actual.ends_with(expected),
            }
        }
    }
}

/// Whether a reference field matches a referenced resource's identifier,
/// after reducing both sides to their final path segment.
pub fn matches_ref(actual: &str, expected: &str) -> bool {
    final_segment(actual) == final_segment(expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(actual: &str, expected: &str, rule: ComparisonRule) -> bool {
        apply_comparison_rule(Some(&json!(actual)), Some(&json!(expected)), rule)
    }

    #[test]
    fn exact_match_semantics() {
        assert!(check("my-bucket-123", "my-bucket-123", ComparisonRule::ExactMatch));
        assert!(!check("my-bucket-456", "my-bucket-123", ComparisonRule::ExactMatch));
        assert!(!check("vm-test-prod", "vm-test", ComparisonRule::ExactMatch));
    }

    #[test]
    fn starts_with_semantics() {
        assert!(check("my-bucket-user1-xyz", "my-bucket", ComparisonRule::StartsWith));
        assert!(!check("user1-my-bucket", "my-bucket", ComparisonRule::StartsWith));
        // A value trivially starts with itself.
        assert!(check("my-bucket", "my-bucket", ComparisonRule::StartsWith));
    }

    #[test]
    fn ends_with_semantics() {
        assert!(check("user1-my-bucket", "my-bucket", ComparisonRule::EndsWith));
        assert!(!check("my-bucket-xyz", "my-bucket", ComparisonRule::EndsWith));
        // A value trivially ends with itself.
        assert!(check("my-bucket", "my-bucket", ComparisonRule::EndsWith));
    }

    #[test]
    fn missing_value_semantics() {
        assert!(apply_comparison_rule(None, None, ComparisonRule::ExactMatch));
        assert!(!apply_comparison_rule(None, None, ComparisonRule::StartsWith));
        assert!(!apply_comparison_rule(None, None, ComparisonRule::EndsWith));
        assert!(!apply_comparison_rule(
            None,
            Some(&json!("value")),
            ComparisonRule::ExactMatch
        ));
        assert!(!apply_comparison_rule(
            Some(&json!("value")),
            None,
            ComparisonRule::StartsWith
        ));
    }

    #[test]
    fn full_paths_reduce_to_last_segment() {
        assert!(check(
            "projects/my-project/topics/topic-abc123",
            "topic-abc",
            ComparisonRule::StartsWith
        ));
        assert!(check(
            "projects/my-project/secrets/my-secret-xyz",
            "xyz",
            ComparisonRule::EndsWith
        ));
        assert!(!check(
            "projects/my-project/topics/other-topic-abc",
            "topic-abc",
            ComparisonRule::StartsWith
        ));
        assert!(!check(
            "projects/my-project/secrets/my-secret-xyz",
            "abc",
            ComparisonRule::EndsWith
        ));
    }

    // The reduction applies symmetrically to exact_match too; this is
    // deliberate, observed behavior rather than an accident.
    #[test]
    fn exact_match_reduces_full_paths_symmetrically() {
        assert!(check(
            "projects/my-project/topics/my-topic",
            "my-topic",
            ComparisonRule::ExactMatch
        ));
        assert!(check(
            "my-topic",
            "projects/other/topics/my-topic",
            ComparisonRule::ExactMatch
        ));
    }

    #[test]
    fn non_string_values_compare_structurally() {
        assert!(apply_comparison_rule(
            Some(&json!(30)),
            Some(&json!(30)),
            ComparisonRule::ExactMatch
        ));
        assert!(!apply_comparison_rule(
            Some(&json!(30)),
            Some(&json!(60)),
            ComparisonRule::ExactMatch
        ));
        assert!(apply_comparison_rule(
            Some(&json!(["a", "b"])),
            Some(&json!(["a", "b"])),
            ComparisonRule::ExactMatch
        ));
        assert!(apply_comparison_rule(
            Some(&json!(false)),
            Some(&json!(false)),
            ComparisonRule::ExactMatch
        ));
    }

    #[test]
    fn matches_ref_reduces_both_sides() {
        assert!(matches_ref("projects/my-project/topics/my-topic", "my-topic"));
        assert!(matches_ref("my-topic", "my-topic"));
        assert!(!matches_ref("my-topic", "other-topic"));
        assert!(matches_ref(
            "projects/project-a/topics/shared-topic",
            "projects/project-b/topics/shared-topic"
        ));
    }
}
