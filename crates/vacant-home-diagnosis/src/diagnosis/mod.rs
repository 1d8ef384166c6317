//! Branching questionnaire diagnosis: answer recording, score aggregation, the prioritized
//! classification cascade and the risk gauge.
//!
//! Presentation layers (terminal, HTTP) drive a [`DiagnosisSession`] opened on a
//! [`DiagnosisEngine`] and render the [`ResultView`] it hands back on completion.

pub mod catalog;
pub mod classification;
pub mod engine;
pub mod import;
pub mod ledger;
pub mod loading;
pub mod risk;
pub mod router;
pub mod scoring;
pub mod session;

#[cfg(test)]
mod tests;

pub use catalog::{
    AnswerOption, CatalogError, CategoryCode, Discriminant, Question, QuestionCatalog,
    ResultCatalog, ResultCategory, ResultPayload,
};
pub use classification::{
    classify, CategoryRule, Classifier, Clause, Condition, DiagnosisPolicy, PolicyError,
    PolicyPreset,
};
pub use engine::{DiagnosisEngine, ResultView};
pub use import::{AnswerSheetImportError, AnswerSheetImporter, AnswerSheetResult};
pub use ledger::{Answer, AnswerLedger};
pub use loading::{LoadingSequence, LoadingStep};
pub use risk::{normalize, RiskScale};
pub use router::diagnosis_router;
pub use scoring::{aggregate, ScoreTotals};
pub use session::{
    DiagnosisOutcome, DiagnosisSession, OptionView, QuestionView, SessionError, SessionState,
    Transition,
};
