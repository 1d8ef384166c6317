mod parser;

use std::io::Read;
use std::path::Path;

use serde::Serialize;

use super::engine::DiagnosisEngine;
use super::session::{DiagnosisOutcome, SessionError};

#[derive(Debug)]
pub enum AnswerSheetImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(String),
    Unanswered {
        respondent: String,
        question_id: u32,
    },
    InvalidAnswer {
        respondent: String,
        question_id: u32,
        value: String,
    },
    Session {
        respondent: String,
        source: SessionError,
    },
}

impl std::fmt::Display for AnswerSheetImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerSheetImportError::Io(err) => write!(f, "failed to read answer sheet: {}", err),
            AnswerSheetImportError::Csv(err) => write!(f, "invalid answer sheet CSV: {}", err),
            AnswerSheetImportError::MissingColumn(column) => {
                write!(f, "answer sheet has no '{}' column", column)
            }
            AnswerSheetImportError::Unanswered {
                respondent,
                question_id,
            } => write!(
                f,
                "respondent '{}' left question {} unanswered",
                respondent, question_id
            ),
            AnswerSheetImportError::InvalidAnswer {
                respondent,
                question_id,
                value,
            } => write!(
                f,
                "respondent '{}' answered question {} with '{}' (expected A-D)",
                respondent, question_id, value
            ),
            AnswerSheetImportError::Session { respondent, source } => write!(
                f,
                "could not score answers for respondent '{}': {}",
                respondent, source
            ),
        }
    }
}

impl std::error::Error for AnswerSheetImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnswerSheetImportError::Io(err) => Some(err),
            AnswerSheetImportError::Csv(err) => Some(err),
            AnswerSheetImportError::Session { source, .. } => Some(source),
            AnswerSheetImportError::MissingColumn(_)
            | AnswerSheetImportError::Unanswered { .. }
            | AnswerSheetImportError::InvalidAnswer { .. } => None,
        }
    }
}

impl From<std::io::Error> for AnswerSheetImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for AnswerSheetImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Scored row of an answer-sheet export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerSheetResult {
    pub respondent: String,
    pub outcome: DiagnosisOutcome,
}

/// Scores exported answer sheets: a `respondent` column plus one `Q<id>` column per question.
pub struct AnswerSheetImporter;

impl AnswerSheetImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        engine: &DiagnosisEngine,
    ) -> Result<Vec<AnswerSheetResult>, AnswerSheetImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, engine)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        engine: &DiagnosisEngine,
    ) -> Result<Vec<AnswerSheetResult>, AnswerSheetImportError> {
        parser::parse_rows(reader, engine.questions())?
            .into_iter()
            .map(|row| match engine.evaluate(&row.answers) {
                Ok(outcome) => Ok(AnswerSheetResult {
                    respondent: row.respondent,
                    outcome,
                }),
                Err(source) => Err(AnswerSheetImportError::Session {
                    respondent: row.respondent,
                    source,
                }),
            })
            .collect()
    }
}
