use std::io::Read;

use super::super::catalog::{Discriminant, QuestionCatalog};
use super::AnswerSheetImportError;

#[derive(Debug)]
pub(crate) struct AnswerSheetRow {
    pub(crate) respondent: String,
    pub(crate) answers: Vec<Discriminant>,
}

pub(crate) const RESPONDENT_COLUMN: &str = "respondent";

pub(crate) fn question_column(question_id: u32) -> String {
    format!("Q{question_id}")
}

/// Read one row per respondent, resolving a `Q<id>` column for every catalog question.
pub(crate) fn parse_rows<R: Read>(
    reader: R,
    catalog: &QuestionCatalog,
) -> Result<Vec<AnswerSheetRow>, AnswerSheetImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let column_of = |name: &str| {
        headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
            .ok_or_else(|| AnswerSheetImportError::MissingColumn(name.to_string()))
    };

    let respondent_column = column_of(RESPONDENT_COLUMN)?;
    let question_columns = catalog
        .questions()
        .iter()
        .map(|question| column_of(&question_column(question.id)).map(|column| (question.id, column)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::new();
    for (line, record) in csv_reader.records().enumerate() {
        let record = record?;
        let respondent = record
            .get(respondent_column)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("row-{}", line + 1));

        let mut answers = Vec::with_capacity(question_columns.len());
        for (question_id, column) in &question_columns {
            let raw = record.get(*column).unwrap_or_default();
            if raw.is_empty() {
                return Err(AnswerSheetImportError::Unanswered {
                    respondent,
                    question_id: *question_id,
                });
            }
            let value =
                raw.parse::<Discriminant>()
                    .map_err(|_| AnswerSheetImportError::InvalidAnswer {
                        respondent: respondent.clone(),
                        question_id: *question_id,
                        value: raw.to_string(),
                    })?;
            answers.push(value);
        }

        rows.push(AnswerSheetRow {
            respondent,
            answers,
        });
    }

    Ok(rows)
}
