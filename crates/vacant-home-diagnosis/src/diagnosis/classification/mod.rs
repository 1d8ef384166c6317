mod config;
mod policy;
mod rules;

pub use config::{CategoryRule, Clause, Condition, DiagnosisPolicy, PolicyError, PolicyPreset};

use super::catalog::ResultCategory;
use super::ledger::AnswerLedger;
use super::scoring::ScoreTotals;
use policy::decide_category;
use rules::RuleInputs;
use tracing::debug;

/// Stateless classifier applying a policy's cascade to totals and recorded answers.
#[derive(Debug, Clone)]
pub struct Classifier {
    policy: DiagnosisPolicy,
}

impl Classifier {
    pub fn new(policy: DiagnosisPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &DiagnosisPolicy {
        &self.policy
    }

    pub fn classify(&self, totals: &ScoreTotals, ledger: &AnswerLedger) -> ResultCategory {
        classify(totals, ledger, &self.policy)
    }
}

pub fn classify(
    totals: &ScoreTotals,
    ledger: &AnswerLedger,
    policy: &DiagnosisPolicy,
) -> ResultCategory {
    let inputs = RuleInputs { totals, ledger };
    let (category, matched_rule) = decide_category(policy, &inputs);

    debug!(
        policy = %policy.name,
        ?totals,
        %category,
        ?matched_rule,
        "classified diagnosis"
    );

    category
}
