use super::super::catalog::ResultCategory;
use super::config::DiagnosisPolicy;
use super::rules::{rule_matches, RuleInputs};

/// Walk the cascade in priority order; later rules are never evaluated once one matches.
pub(crate) fn decide_category(
    policy: &DiagnosisPolicy,
    inputs: &RuleInputs<'_>,
) -> (ResultCategory, Option<usize>) {
    for (position, rule) in policy.rules.iter().enumerate() {
        if rule_matches(rule, inputs) {
            return (rule.category, Some(position));
        }
    }

    (policy.fallback, None)
}
