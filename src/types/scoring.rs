use crate::types::criteria::CriterionId;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KnockoutOutcome {
    NotApplicable,
    Pass,
    Review,
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    NotRequired,
    Present,
    Missing,
}

/// Coarse approval gate derived from a band's position in its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Rejected,
    Conditional,
    Approved,
}

impl Verdict {
    /// The lowest band rejects, the band directly above it is conditional,
    /// everything higher approves.
    pub fn for_band(index: usize, band_count: usize) -> Self {
        let from_bottom = band_count.saturating_sub(index + 1);
        match from_bottom {
            0 => Verdict::Rejected,
            1 => Verdict::Conditional,
            _ => Verdict::Approved,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownEntry {
    pub criterion: CriterionId,
    pub raw_score: f64,
    pub weight: f64,
    pub weighted_score: f64,
    pub knockout: KnockoutOutcome,
    pub documentation: DocumentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringResult {
    pub table: String,
    /// Weighted average before the documentation penalty.
    pub base_score: f64,
    pub doc_penalty: f64,
    pub total_score: f64,
    pub scaled_score: f64,
    pub status: String,
    pub verdict: Verdict,
    pub knockout_failed: bool,
    pub requires_manual_review: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    pub reasons: Vec<String>,
    pub breakdown: Vec<BreakdownEntry>,
    pub skipped: Vec<CriterionId>,
}

impl ScoringResult {
    pub fn weight_total(&self) -> f64 {
        self.breakdown.iter().map(|entry| entry.weight).sum()
    }

    pub fn weighted_sum(&self) -> f64 {
        self.breakdown.iter().map(|entry| entry.weighted_score).sum()
    }

    pub fn reconstructed_score(&self) -> f64 {
        let total_weight = self.weight_total();
        if total_weight > 0.0 {
            self.weighted_sum() / total_weight
        } else {
            0.0
        }
    }
}
