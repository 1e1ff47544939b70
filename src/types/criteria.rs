use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Opaque criterion identifier. Input files may use strings or integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawCriterionId", into = "String")]
pub struct CriterionId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCriterionId {
    Text(String),
    Number(i64),
}

impl From<RawCriterionId> for CriterionId {
    fn from(value: RawCriterionId) -> Self {
        match value {
            RawCriterionId::Text(text) => Self(text),
            RawCriterionId::Number(number) => Self(number.to_string()),
        }
    }
}

impl From<CriterionId> for String {
    fn from(value: CriterionId) -> Self {
        value.0
    }
}

impl From<&str> for CriterionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl CriterionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CriterionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub weight: f64,
    #[serde(default, alias = "is_knockout")]
    pub knockout: bool,
    #[serde(default)]
    pub requires_doc: bool,
}

impl Criterion {
    pub fn new(id: &str, weight: f64) -> Self {
        Self {
            id: CriterionId::from(id),
            name: None,
            weight,
            knockout: false,
            requires_doc: false,
        }
    }

    pub fn knockout(mut self) -> Self {
        self.knockout = true;
        self
    }

    pub fn requires_doc(mut self) -> Self {
        self.requires_doc = true;
        self
    }

    /// Weight actually used in aggregation. Zero, negative and non-finite
    /// weights contribute nothing.
    pub fn effective_weight(&self) -> f64 {
        if self.weight.is_finite() && self.weight > 0.0 {
            self.weight
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriteriaSet {
    #[serde(default)]
    pub criteria: Vec<Criterion>,
}

impl CriteriaSet {
    pub fn new(criteria: Vec<Criterion>) -> Self {
        Self { criteria }
    }

    pub fn lookup(&self) -> HashMap<&CriterionId, &Criterion> {
        self.criteria
            .iter()
            .map(|criterion| (&criterion.id, criterion))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Score { score: f64 },
    Passed { passed: bool },
}

impl Answer {
    // Pass/fail answers map to the scale's endpoints.
    pub fn value(&self, max_score: f64) -> f64 {
        match self {
            Answer::Score { score } => *score,
            Answer::Passed { passed: true } => max_score,
            Answer::Passed { passed: false } => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationItem {
    pub criterion: CriterionId,
    #[serde(flatten)]
    pub answer: Answer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_documentation: Option<bool>,
}

impl EvaluationItem {
    pub fn scored(criterion: &str, score: f64) -> Self {
        Self {
            criterion: CriterionId::from(criterion),
            answer: Answer::Score { score },
            has_documentation: None,
        }
    }

    pub fn with_documentation(mut self, present: bool) -> Self {
        self.has_documentation = Some(present);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSheet {
    pub site: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluated_at: Option<NaiveDate>,
    #[serde(default)]
    pub items: Vec<EvaluationItem>,
}
