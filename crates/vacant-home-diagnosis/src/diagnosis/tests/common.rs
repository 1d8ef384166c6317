use std::collections::BTreeMap;

use crate::diagnosis::catalog::{
    AnswerOption, Discriminant, Question, QuestionCatalog, ResultCatalog,
};
use crate::diagnosis::classification::DiagnosisPolicy;
use crate::diagnosis::engine::DiagnosisEngine;
use crate::diagnosis::ledger::AnswerLedger;

/// Fifteen answers that stay below every threshold of the standard catalog.
pub(super) const CALM_PATH: &str = "AAAAAAAAAAAAAAC";
/// Fifteen answers that land on the legal path of the standard catalog.
pub(super) const LEGAL_PATH: &str = "AAADCDDAAAAAADA";
/// Fifteen answers that land on the burden path of the standard catalog.
pub(super) const BURDEN_PATH: &str = "ACDAAAACCCDAAAC";

pub(super) fn engine() -> DiagnosisEngine {
    DiagnosisEngine::standard()
}

pub(super) fn single_threshold_engine() -> DiagnosisEngine {
    DiagnosisEngine::new(
        QuestionCatalog::standard(),
        ResultCatalog::standard(),
        DiagnosisPolicy::single_threshold(),
    )
}

pub(super) fn answers(raw: &str) -> Vec<Discriminant> {
    raw.chars()
        .map(|value| {
            value
                .to_string()
                .parse::<Discriminant>()
                .expect("valid discriminant")
        })
        .collect()
}

pub(super) fn option(value: Discriminant, score: &[(&str, i32)]) -> AnswerOption {
    AnswerOption {
        text: format!("option {value}"),
        value,
        score: score
            .iter()
            .map(|(key, delta)| (key.to_string(), *delta))
            .collect(),
    }
}

/// Ledger carrying discriminants only, for cascade tests that supply totals directly.
pub(super) fn ledger_with(choices: &[(u32, Discriminant)]) -> AnswerLedger {
    let mut ledger = AnswerLedger::new();
    for (index, (question_id, value)) in choices.iter().enumerate() {
        ledger.record(index, *question_id, option(*value, &[]));
    }
    ledger
}

/// Three-question catalog with small scores for session walk-throughs.
pub(super) fn tiny_catalog() -> QuestionCatalog {
    let question = |id: u32, scores: [(&str, i32); 2]| Question {
        id,
        text: format!("question {id}"),
        options: vec![
            option(Discriminant::A, &[]),
            option(Discriminant::B, &[scores[0]]),
            option(Discriminant::C, &scores),
        ],
    };

    QuestionCatalog::new(vec![
        question(1, [("U", 4), ("B", 2)]),
        question(2, [("L", 3), ("V", 1)]),
        question(3, [("B", 5), ("U", 1)]),
    ])
    .expect("tiny catalog is valid")
}

pub(super) fn tiny_engine() -> DiagnosisEngine {
    DiagnosisEngine::new(
        tiny_catalog(),
        ResultCatalog::standard(),
        DiagnosisPolicy::dual_threshold(),
    )
}

pub(super) fn empty_results_engine() -> DiagnosisEngine {
    DiagnosisEngine::new(
        QuestionCatalog::standard(),
        ResultCatalog::new(BTreeMap::new()),
        DiagnosisPolicy::dual_threshold(),
    )
}
