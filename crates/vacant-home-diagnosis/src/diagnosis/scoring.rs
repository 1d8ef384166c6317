use serde::{Deserialize, Serialize};

use super::catalog::CategoryCode;
use super::ledger::AnswerLedger;

/// Per-category totals derived from a ledger. Always rebuilt from scratch, never patched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTotals {
    #[serde(rename = "U")]
    pub urgency: i32,
    #[serde(rename = "L")]
    pub legal: i32,
    #[serde(rename = "B")]
    pub burden: i32,
    #[serde(rename = "V")]
    pub value: i32,
}

impl ScoreTotals {
    pub fn new(urgency: i32, legal: i32, burden: i32, value: i32) -> Self {
        Self {
            urgency,
            legal,
            burden,
            value,
        }
    }

    pub fn get(&self, category: CategoryCode) -> i32 {
        match category {
            CategoryCode::Urgency => self.urgency,
            CategoryCode::Legal => self.legal,
            CategoryCode::Burden => self.burden,
            CategoryCode::Value => self.value,
        }
    }

    pub fn sum(&self) -> i32 {
        self.urgency
            .saturating_add(self.legal)
            .saturating_add(self.burden)
            .saturating_add(self.value)
    }

    fn add(&mut self, category: CategoryCode, delta: i32) {
        match category {
            CategoryCode::Urgency => self.urgency = self.urgency.saturating_add(delta),
            CategoryCode::Legal => self.legal = self.legal.saturating_add(delta),
            CategoryCode::Burden => self.burden = self.burden.saturating_add(delta),
            CategoryCode::Value => self.value = self.value.saturating_add(delta),
        }
    }
}

/// Fold every recorded answer into fresh totals. Unknown score keys are skipped.
pub fn aggregate(ledger: &AnswerLedger) -> ScoreTotals {
    ledger
        .answers()
        .flat_map(|answer| answer.selected_option.score.iter())
        .filter_map(|(key, delta)| CategoryCode::from_key(key).map(|category| (category, *delta)))
        .fold(ScoreTotals::default(), |mut totals, (category, delta)| {
            totals.add(category, delta);
            totals
        })
}
