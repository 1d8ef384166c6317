use serde::{Deserialize, Serialize};

use super::catalog::{AnswerOption, Discriminant};

/// Option chosen for a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: u32,
    pub selected_option: AnswerOption,
}

/// Answers recorded by question index. Re-answering an index replaces the previous choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerLedger {
    slots: Vec<Option<Answer>>,
}

impl AnswerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, question_index: usize, question_id: u32, option: AnswerOption) {
        if self.slots.len() <= question_index {
            self.slots.resize(question_index + 1, None);
        }
        self.slots[question_index] = Some(Answer {
            question_id,
            selected_option: option,
        });
    }

    /// Discriminant chosen for `question_id`, looked up by id rather than by position.
    pub fn get(&self, question_id: u32) -> Option<Discriminant> {
        self.answers()
            .find(|answer| answer.question_id == question_id)
            .map(|answer| answer.selected_option.value)
    }

    pub fn answer_at(&self, question_index: usize) -> Option<&Answer> {
        self.slots.get(question_index).and_then(Option::as_ref)
    }

    pub fn answers(&self) -> impl Iterator<Item = &Answer> + '_ {
        self.slots.iter().flatten()
    }

    /// Number of recorded answers.
    pub fn len(&self) -> usize {
        self.answers().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn option(value: Discriminant) -> AnswerOption {
        AnswerOption {
            text: value.to_string(),
            value,
            score: BTreeMap::new(),
        }
    }

    #[test]
    fn get_looks_up_by_question_id() {
        let mut ledger = AnswerLedger::new();
        ledger.record(0, 5, option(Discriminant::B));
        ledger.record(1, 7, option(Discriminant::D));

        assert_eq!(ledger.get(5), Some(Discriminant::B));
        assert_eq!(ledger.get(7), Some(Discriminant::D));
        assert_eq!(ledger.get(9), None);
    }

    #[test]
    fn record_overwrites_same_index() {
        let mut ledger = AnswerLedger::new();
        ledger.record(2, 3, option(Discriminant::A));
        ledger.record(2, 3, option(Discriminant::C));

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(3), Some(Discriminant::C));
        assert!(ledger.answer_at(0).is_none());
    }

    #[test]
    fn clear_drops_every_answer() {
        let mut ledger = AnswerLedger::new();
        ledger.record(0, 1, option(Discriminant::A));
        ledger.clear();

        assert!(ledger.is_empty());
        assert_eq!(ledger.get(1), None);
    }
}
