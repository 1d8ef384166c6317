use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::{Discriminant, Question, ResultCategory};
use super::engine::{DiagnosisEngine, ResultView};
use super::ledger::AnswerLedger;
use super::scoring::{aggregate, ScoreTotals};

/// Category, risk percentage and totals produced when a session completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisOutcome {
    pub category: ResultCategory,
    pub risk: i32,
    pub totals: ScoreTotals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    InProgress { cursor: usize },
    Completed { outcome: DiagnosisOutcome },
}

/// Option as shown to the respondent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub text: String,
    pub value: Discriminant,
}

/// Everything the presentation layer needs to render the current question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    /// 1-based position in the questionnaire.
    pub number: usize,
    pub total: usize,
    pub question_id: u32,
    pub text: String,
    pub options: Vec<OptionView>,
    pub can_go_back: bool,
}

impl QuestionView {
    pub(crate) fn new(question: &Question, cursor: usize, total: usize) -> Self {
        Self {
            number: cursor + 1,
            total,
            question_id: question.id,
            text: question.text.clone(),
            options: question
                .options
                .iter()
                .map(|option| OptionView {
                    text: option.text.clone(),
                    value: option.value,
                })
                .collect(),
            can_go_back: cursor > 0,
        }
    }
}

/// Result of a forward answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    Question(QuestionView),
    Completed(DiagnosisOutcome),
}

/// Errors raised when the presentation layer drives a session out of order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session is not in progress")]
    NotInProgress,
    #[error("question {question_id} has no option {value}")]
    UnknownOption {
        question_id: u32,
        value: Discriminant,
    },
    #[error("no question at position {0}")]
    QuestionMissing(usize),
    #[error("expected {expected} answers, received {received}")]
    AnswerCount { expected: usize, received: usize },
}

/// One respondent's walk through the questionnaire.
///
/// The session owns its ledger; catalogs and policy come from the engine it was opened on.
/// Totals are re-aggregated from the full ledger on completion, so navigating back and
/// re-answering is always reflected.
#[derive(Debug, Clone)]
pub struct DiagnosisSession {
    engine: DiagnosisEngine,
    ledger: AnswerLedger,
    state: SessionState,
}

impl DiagnosisSession {
    pub fn new(engine: DiagnosisEngine) -> Self {
        Self {
            engine,
            ledger: AnswerLedger::new(),
            state: SessionState::NotStarted,
        }
    }

    /// Begin (or restart) the questionnaire from the first question with an empty ledger.
    pub fn start(&mut self) -> Result<QuestionView, SessionError> {
        self.ledger.clear();
        self.state = SessionState::InProgress { cursor: 0 };
        self.view_at(0)
    }

    /// Record `value` for the current question, then advance or complete.
    pub fn answer(&mut self, value: Discriminant) -> Result<Transition, SessionError> {
        let cursor = self.cursor().ok_or(SessionError::NotInProgress)?;
        let questions = self.engine.questions();
        let question = questions
            .get(cursor)
            .ok_or(SessionError::QuestionMissing(cursor))?;
        let option = question
            .option(value)
            .cloned()
            .ok_or(SessionError::UnknownOption {
                question_id: question.id,
                value,
            })?;

        self.ledger.record(cursor, question.id, option);

        let next = cursor + 1;
        if next < questions.len() {
            self.state = SessionState::InProgress { cursor: next };
            return self.view_at(next).map(Transition::Question);
        }

        let outcome = self.finish();
        Ok(Transition::Completed(outcome))
    }

    /// Step back one question. A no-op on the first question.
    pub fn back(&mut self) -> Result<QuestionView, SessionError> {
        let cursor = self.cursor().ok_or(SessionError::NotInProgress)?;
        let previous = cursor.saturating_sub(1);
        self.state = SessionState::InProgress { cursor: previous };
        self.view_at(previous)
    }

    pub fn current_question(&self) -> Option<QuestionView> {
        self.cursor().and_then(|cursor| self.view_at(cursor).ok())
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn ledger(&self) -> &AnswerLedger {
        &self.ledger
    }

    pub fn outcome(&self) -> Option<&DiagnosisOutcome> {
        match &self.state {
            SessionState::Completed { outcome } => Some(outcome),
            _ => None,
        }
    }

    /// Result payload for a completed session, `None` while in progress or when the result
    /// catalog has no entry for the category.
    pub fn result_view(&self) -> Option<ResultView> {
        self.outcome().and_then(|outcome| self.engine.render(outcome))
    }

    fn cursor(&self) -> Option<usize> {
        match self.state {
            SessionState::InProgress { cursor } => Some(cursor),
            _ => None,
        }
    }

    fn view_at(&self, cursor: usize) -> Result<QuestionView, SessionError> {
        let questions = self.engine.questions();
        questions
            .get(cursor)
            .map(|question| QuestionView::new(question, cursor, questions.len()))
            .ok_or(SessionError::QuestionMissing(cursor))
    }

    fn finish(&mut self) -> DiagnosisOutcome {
        let totals = aggregate(&self.ledger);
        let classifier = self.engine.classifier();
        let category = classifier.classify(&totals, &self.ledger);
        let risk = classifier.policy().risk.normalize(&totals);
        let outcome = DiagnosisOutcome {
            category,
            risk,
            totals,
        };

        debug!(
            %category,
            risk,
            answers = self.ledger.len(),
            "diagnosis completed"
        );

        self.state = SessionState::Completed { outcome };
        outcome
    }
}
