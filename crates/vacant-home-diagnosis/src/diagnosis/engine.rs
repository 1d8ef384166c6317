use std::sync::Arc;

use serde::Serialize;
use tracing::{error, warn};

use super::catalog::{
    Discriminant, QuestionCatalog, ResultCatalog, ResultCategory, ResultPayload,
};
use super::classification::{Classifier, DiagnosisPolicy};
use super::scoring::ScoreTotals;
use super::session::{DiagnosisOutcome, DiagnosisSession, SessionError, Transition};

/// Completed outcome joined with its display payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub category: ResultCategory,
    pub risk: i32,
    pub totals: ScoreTotals,
    pub payload: ResultPayload,
}

/// Injected catalogs and policy shared by every session opened on this engine.
#[derive(Debug, Clone)]
pub struct DiagnosisEngine {
    questions: Arc<QuestionCatalog>,
    results: Arc<ResultCatalog>,
    classifier: Arc<Classifier>,
}

impl DiagnosisEngine {
    pub fn new(
        questions: QuestionCatalog,
        results: ResultCatalog,
        policy: DiagnosisPolicy,
    ) -> Self {
        let engine = Self {
            questions: Arc::new(questions),
            results: Arc::new(results),
            classifier: Arc::new(Classifier::new(policy)),
        };
        engine.check_configuration();
        engine
    }

    /// Standard catalogs with the dual-threshold policy.
    pub fn standard() -> Self {
        Self::new(
            QuestionCatalog::standard(),
            ResultCatalog::standard(),
            DiagnosisPolicy::default(),
        )
    }

    pub fn questions(&self) -> &QuestionCatalog {
        &self.questions
    }

    pub fn results(&self) -> &ResultCatalog {
        &self.results
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn policy(&self) -> &DiagnosisPolicy {
        self.classifier.policy()
    }

    pub fn session(&self) -> DiagnosisSession {
        DiagnosisSession::new(self.clone())
    }

    /// Replay a complete, ordered answer list through a fresh session.
    pub fn evaluate(&self, answers: &[Discriminant]) -> Result<DiagnosisOutcome, SessionError> {
        let expected = self.questions.len();
        if answers.len() != expected {
            return Err(SessionError::AnswerCount {
                expected,
                received: answers.len(),
            });
        }

        let mut session = self.session();
        session.start()?;
        for value in answers {
            if let Transition::Completed(outcome) = session.answer(*value)? {
                return Ok(outcome);
            }
        }

        Err(SessionError::AnswerCount {
            expected,
            received: answers.len(),
        })
    }

    /// Look up the payload for a completed outcome. A category missing from the result
    /// catalog is logged and yields `None`.
    pub fn render(&self, outcome: &DiagnosisOutcome) -> Option<ResultView> {
        let Some(payload) = self.results.get(outcome.category) else {
            error!(category = %outcome.category, "unknown result type");
            return None;
        };

        Some(ResultView {
            category: outcome.category,
            risk: outcome.risk,
            totals: outcome.totals,
            payload: payload.clone(),
        })
    }

    fn check_configuration(&self) {
        let attainable = self.questions.max_attainable_score();
        let scale_max = self.policy().risk.max_score();
        if attainable != scale_max {
            warn!(
                attainable,
                scale_max, "risk scale maximum does not match the question catalog"
            );
        }

        for question_id in self.policy().referenced_questions() {
            if self.questions.by_id(question_id).is_none() {
                warn!(
                    question_id,
                    policy = %self.policy().name,
                    "policy references a question missing from the catalog"
                );
            }
        }
    }
}
