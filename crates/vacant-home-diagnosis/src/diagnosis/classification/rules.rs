use super::super::ledger::AnswerLedger;
use super::super::scoring::ScoreTotals;
use super::config::{CategoryRule, Clause, Condition};

pub(crate) struct RuleInputs<'a> {
    pub totals: &'a ScoreTotals,
    pub ledger: &'a AnswerLedger,
}

pub(crate) fn condition_holds(condition: &Condition, inputs: &RuleInputs<'_>) -> bool {
    match condition {
        Condition::ScoreAtLeast {
            category,
            threshold,
        } => inputs.totals.get(*category) >= *threshold,
        Condition::ScoreAtMost {
            category,
            threshold,
        } => inputs.totals.get(*category) <= *threshold,
        Condition::AnswerIn {
            question_id,
            values,
        } => inputs
            .ledger
            .get(*question_id)
            .map(|value| values.contains(&value))
            .unwrap_or(false),
    }
}

pub(crate) fn clause_holds(clause: &Clause, inputs: &RuleInputs<'_>) -> bool {
    clause
        .all_of
        .iter()
        .all(|condition| condition_holds(condition, inputs))
}

pub(crate) fn rule_matches(rule: &CategoryRule, inputs: &RuleInputs<'_>) -> bool {
    rule.any_of.iter().any(|clause| clause_holds(clause, inputs))
}
