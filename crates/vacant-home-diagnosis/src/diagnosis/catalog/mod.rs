//! Question and result catalogs consumed by the diagnosis engine.
//!
//! Both catalogs are supplied wholesale before any session starts and stay immutable for the
//! lifetime of the sessions that borrow them.

mod standard;

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Largest magnitude a single option may contribute to one category.
pub const MAX_SCORE_DELTA: i32 = 1_000;

/// Single-letter identity of an option, tested by cascade rules independently of its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Discriminant {
    A,
    B,
    C,
    D,
}

impl Discriminant {
    pub fn as_str(self) -> &'static str {
        match self {
            Discriminant::A => "A",
            Discriminant::B => "B",
            Discriminant::C => "C",
            Discriminant::D => "D",
        }
    }
}

impl fmt::Display for Discriminant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Discriminant {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Discriminant::A),
            "B" => Ok(Discriminant::B),
            "C" => Ok(Discriminant::C),
            "D" => Ok(Discriminant::D),
            _ => Err(CatalogError::InvalidDiscriminant(value.trim().to_string())),
        }
    }
}

/// Scoring dimension accumulated independently across answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CategoryCode {
    #[serde(rename = "U")]
    Urgency,
    #[serde(rename = "L")]
    Legal,
    #[serde(rename = "B")]
    Burden,
    #[serde(rename = "V")]
    Value,
}

impl CategoryCode {
    pub const ALL: [CategoryCode; 4] = [
        CategoryCode::Urgency,
        CategoryCode::Legal,
        CategoryCode::Burden,
        CategoryCode::Value,
    ];

    /// Resolve a raw score key. Unknown keys yield `None` so malformed catalog entries are
    /// skipped during aggregation.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "U" => Some(CategoryCode::Urgency),
            "L" => Some(CategoryCode::Legal),
            "B" => Some(CategoryCode::Burden),
            "V" => Some(CategoryCode::Value),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            CategoryCode::Urgency => "U",
            CategoryCode::Legal => "L",
            CategoryCode::Burden => "B",
            CategoryCode::Value => "V",
        }
    }
}

/// One selectable option of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    pub value: Discriminant,
    /// Partial score contribution keyed by raw category code (`U`, `L`, `B`, `V`).
    #[serde(default)]
    pub score: BTreeMap<String, i32>,
}

impl AnswerOption {
    /// Sum of the recognised category deltas carried by this option.
    pub fn score_sum(&self) -> i32 {
        self.score
            .iter()
            .filter(|(key, _)| CategoryCode::from_key(key).is_some())
            .fold(0_i32, |sum, (_, delta)| sum.saturating_add(*delta))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn option(&self, value: Discriminant) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

/// Ordered list of questions presented to every respondent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Build a catalog, rejecting empty lists, zero or duplicate ids, option-less questions and
    /// score deltas beyond `MAX_SCORE_DELTA`.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if question.id == 0 {
                return Err(CatalogError::ZeroQuestionId);
            }
            if !seen.insert(question.id) {
                return Err(CatalogError::DuplicateQuestionId(question.id));
            }
            if question.options.is_empty() {
                return Err(CatalogError::NoOptions(question.id));
            }
            let mut values = HashSet::new();
            for option in &question.options {
                if !values.insert(option.value) {
                    return Err(CatalogError::DuplicateOption {
                        question_id: question.id,
                        value: option.value,
                    });
                }
                if let Some((key, delta)) = option
                    .score
                    .iter()
                    .find(|(_, delta)| delta.unsigned_abs() > MAX_SCORE_DELTA.unsigned_abs())
                {
                    return Err(CatalogError::ScoreOutOfRange {
                        question_id: question.id,
                        value: option.value,
                        category: key.clone(),
                        delta: *delta,
                    });
                }
            }
        }

        Ok(Self { questions })
    }

    pub fn standard() -> Self {
        Self {
            questions: standard::standard_questions(),
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let questions: Vec<Question> = serde_json::from_reader(reader)?;
        Self::new(questions)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn by_id(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Highest total score a single respondent can reach: the best-scoring option of every
    /// question, summed. Used to check the risk scale's maximum whenever the catalog changes.
    pub fn max_attainable_score(&self) -> i32 {
        self.questions
            .iter()
            .map(|question| {
                question
                    .options
                    .iter()
                    .map(AnswerOption::score_sum)
                    .max()
                    .unwrap_or(0)
            })
            .fold(0_i32, i32::saturating_add)
    }
}

/// Outcome category produced by the cascade. `E` is the emergency outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResultCategory {
    A,
    B,
    C,
    D,
    E,
}

impl ResultCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultCategory::A => "A",
            ResultCategory::B => "B",
            ResultCategory::C => "C",
            ResultCategory::D => "D",
            ResultCategory::E => "E",
        }
    }
}

impl fmt::Display for ResultCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultCategory {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(ResultCategory::A),
            "B" => Ok(ResultCategory::B),
            "C" => Ok(ResultCategory::C),
            "D" => Ok(ResultCategory::D),
            "E" => Ok(ResultCategory::E),
            _ => Err(CatalogError::InvalidCategory(value.trim().to_string())),
        }
    }
}

/// Display copy for a result screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPayload {
    pub label: String,
    pub headline: String,
    pub sub_copy: String,
    pub why_now: String,
    pub risk: String,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub supplement: String,
    pub cta_text: String,
}

/// Result payloads keyed by category. Entries may be missing when loaded from external data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultCatalog {
    results: BTreeMap<ResultCategory, ResultPayload>,
}

impl ResultCatalog {
    pub fn new(results: BTreeMap<ResultCategory, ResultPayload>) -> Self {
        Self { results }
    }

    pub fn standard() -> Self {
        Self {
            results: standard::standard_results(),
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn get(&self, category: ResultCategory) -> Option<&ResultPayload> {
        self.results.get(&category)
    }

    pub fn categories(&self) -> impl Iterator<Item = ResultCategory> + '_ {
        self.results.keys().copied()
    }
}

/// Catalog loading and parsing failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("question catalog is empty")]
    Empty,
    #[error("question ids must be 1-based")]
    ZeroQuestionId,
    #[error("question id {0} appears more than once")]
    DuplicateQuestionId(u32),
    #[error("question {0} has no options")]
    NoOptions(u32),
    #[error("question {question_id} lists option {value} more than once")]
    DuplicateOption { question_id: u32, value: Discriminant },
    #[error(
        "question {question_id} option {value} scores {delta} for '{category}' (limit is {})",
        MAX_SCORE_DELTA
    )]
    ScoreOutOfRange {
        question_id: u32,
        value: Discriminant,
        category: String,
        delta: i32,
    },
    #[error("'{0}' is not an option value (expected A-D)")]
    InvalidDiscriminant(String),
    #[error("'{0}' is not a result category (expected A-E)")]
    InvalidCategory(String),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}
