use crate::types::scoring::{ScoringResult, Verdict};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteResult {
    pub site: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluated_at: Option<NaiveDate>,
    pub result: ScoringResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteReport {
    pub site: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluated_at: Option<NaiveDate>,
    pub generated_at: String,
    pub config_digest: String,
    pub results: Vec<ScoringResult>,
}

impl SiteReport {
    /// The most severe verdict across all scored tables.
    pub fn worst_verdict(&self) -> Option<Verdict> {
        self.results.iter().map(|result| result.verdict).min()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkEntry {
    pub rank: usize,
    pub site: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluated_at: Option<NaiveDate>,
    pub total_score: f64,
    pub status: String,
    pub verdict: Verdict,
    pub percentile: f64,
    pub delta_from_mean: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Benchmark {
    pub table: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub entries: Vec<BenchmarkEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Improving,
    Stable,
    Declining,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluated_at: Option<NaiveDate>,
    pub total_score: f64,
    pub status: String,
    /// Change against the previous point; absent for the first one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub site: String,
    pub table: String,
    pub points: Vec<TrendPoint>,
    pub overall_delta: f64,
    pub direction: Direction,
    pub tier_changes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CohortReport<T: Serialize> {
    pub generated_at: String,
    pub config_digest: String,
    #[serde(flatten)]
    pub body: T,
}
