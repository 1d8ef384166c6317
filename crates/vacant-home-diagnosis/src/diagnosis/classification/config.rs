use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::super::catalog::{CategoryCode, Discriminant, ResultCategory};
use super::super::risk::RiskScale;

/// Thresholds, question references and risk scale driving classification.
///
/// `rules` is evaluated in order and the first matching rule decides the category; `fallback`
/// applies when nothing matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisPolicy {
    pub name: String,
    pub rules: Vec<CategoryRule>,
    pub fallback: ResultCategory,
    #[serde(default)]
    pub risk: RiskScale,
}

/// A category is selected when any of its clauses holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: ResultCategory,
    pub any_of: Vec<Clause>,
}

/// Conjunction of conditions. An empty clause always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub all_of: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    ScoreAtLeast {
        category: CategoryCode,
        threshold: i32,
    },
    ScoreAtMost {
        category: CategoryCode,
        threshold: i32,
    },
    /// Holds when the respondent answered `question_id` with one of `values`.
    /// An unanswered question never matches.
    AnswerIn {
        question_id: u32,
        values: Vec<Discriminant>,
    },
}

/// Built-in policy variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyPreset {
    /// Hard ceiling of 19 per category plus combined 13-point triggers.
    #[default]
    DualThreshold,
    /// Earlier single-threshold cascade.
    SingleThreshold,
}

impl PolicyPreset {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyPreset::DualThreshold => "dual_threshold",
            PolicyPreset::SingleThreshold => "single_threshold",
        }
    }
}

impl fmt::Display for PolicyPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyPreset {
    type Err = PolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "dual_threshold" | "dual" => Ok(PolicyPreset::DualThreshold),
            "single_threshold" | "single" => Ok(PolicyPreset::SingleThreshold),
            _ => Err(PolicyError::UnknownPreset(value.trim().to_string())),
        }
    }
}

fn at_least(category: CategoryCode, threshold: i32) -> Condition {
    Condition::ScoreAtLeast {
        category,
        threshold,
    }
}

fn at_most(category: CategoryCode, threshold: i32) -> Condition {
    Condition::ScoreAtMost {
        category,
        threshold,
    }
}

fn answer_in(question_id: u32, values: &[Discriminant]) -> Condition {
    Condition::AnswerIn {
        question_id,
        values: values.to_vec(),
    }
}

fn clause(conditions: Vec<Condition>) -> Clause {
    Clause {
        all_of: conditions,
    }
}

impl DiagnosisPolicy {
    pub fn preset(preset: PolicyPreset) -> Self {
        match preset {
            PolicyPreset::DualThreshold => Self::dual_threshold(),
            PolicyPreset::SingleThreshold => Self::single_threshold(),
        }
    }

    pub fn dual_threshold() -> Self {
        use CategoryCode::{Burden, Legal, Urgency, Value};
        use Discriminant::{A, B, C, D};

        Self {
            name: PolicyPreset::DualThreshold.as_str().to_string(),
            rules: vec![
                CategoryRule {
                    category: ResultCategory::E,
                    any_of: vec![
                        clause(vec![at_least(Urgency, 19)]),
                        clause(vec![at_least(Urgency, 13), at_least(Burden, 13)]),
                        clause(vec![at_least(Urgency, 13), at_least(Legal, 13)]),
                    ],
                },
                CategoryRule {
                    category: ResultCategory::C,
                    any_of: vec![
                        clause(vec![at_least(Legal, 19)]),
                        clause(vec![at_least(Legal, 13), answer_in(5, &[B, C])]),
                        clause(vec![at_least(Legal, 13), answer_in(7, &[C, D])]),
                    ],
                },
                CategoryRule {
                    category: ResultCategory::B,
                    any_of: vec![
                        clause(vec![at_least(Burden, 19)]),
                        clause(vec![at_least(Burden, 13), answer_in(9, &[C, D])]),
                        clause(vec![at_least(Burden, 13), answer_in(10, &[C, D])]),
                    ],
                },
                CategoryRule {
                    category: ResultCategory::D,
                    any_of: vec![
                        clause(vec![at_least(Value, 19)]),
                        clause(vec![
                            at_least(Value, 13),
                            answer_in(15, &[A, B]),
                            at_most(Burden, 12),
                        ]),
                    ],
                },
            ],
            fallback: ResultCategory::A,
            risk: RiskScale::default(),
        }
    }

    pub fn single_threshold() -> Self {
        use CategoryCode::{Burden, Legal, Urgency, Value};
        use Discriminant::{B, C, D};

        Self {
            name: PolicyPreset::SingleThreshold.as_str().to_string(),
            rules: vec![
                CategoryRule {
                    category: ResultCategory::E,
                    any_of: vec![clause(vec![at_least(Urgency, 12)])],
                },
                CategoryRule {
                    category: ResultCategory::C,
                    any_of: vec![
                        clause(vec![at_least(Legal, 10), answer_in(5, &[B, C])]),
                        clause(vec![at_least(Legal, 10), answer_in(7, &[C, D])]),
                    ],
                },
                CategoryRule {
                    category: ResultCategory::B,
                    any_of: vec![
                        clause(vec![at_least(Burden, 12)]),
                        clause(vec![answer_in(10, &[D])]),
                    ],
                },
                CategoryRule {
                    category: ResultCategory::D,
                    any_of: vec![clause(vec![at_least(Value, 10), at_most(Burden, 15)])],
                },
            ],
            fallback: ResultCategory::A,
            risk: RiskScale::default(),
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PolicyError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Question ids referenced by `answer_in` conditions, in rule order.
    pub fn referenced_questions(&self) -> Vec<u32> {
        let mut ids = Vec::new();
        for condition in self
            .rules
            .iter()
            .flat_map(|rule| rule.any_of.iter())
            .flat_map(|clause| clause.all_of.iter())
        {
            if let Condition::AnswerIn { question_id, .. } = condition {
                if !ids.contains(question_id) {
                    ids.push(*question_id);
                }
            }
        }
        ids
    }
}

impl Default for DiagnosisPolicy {
    fn default() -> Self {
        Self::dual_threshold()
    }
}

/// Policy loading failures.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("unknown policy preset '{0}' (expected dual_threshold or single_threshold)")]
    UnknownPreset(String),
    #[error("risk scale maximum must be positive, got {0}")]
    InvalidMaxScore(i32),
    #[error("invalid policy JSON: {0}")]
    Json(#[from] serde_json::Error),
}
