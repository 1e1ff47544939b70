pub mod aggregate;
pub mod benchmark;
pub mod classify;
pub mod knockout;
pub mod trend;

use crate::types::config::{BandTable, ScoringConfig};
use crate::types::criteria::{CriteriaSet, EvaluationItem};
use crate::types::scoring::{BreakdownEntry, KnockoutOutcome, ScoringResult};
use aggregate::round_to;
use knockout::KnockoutAssessment;

/// Scores one evaluation under one band table. Scores must be range-checked
/// by `boundary` first.
pub fn evaluate(
    items: &[EvaluationItem],
    criteria: &CriteriaSet,
    config: &ScoringConfig,
    table_name: &str,
    table: &BandTable,
) -> ScoringResult {
    let decimal_places = config.scoring.decimal_places;
    let (resolved, skipped) = aggregate::resolve(items, criteria, config.scoring.max_score);
    let base = aggregate::weighted_average(&resolved, decimal_places);

    let (assessment, documentation) = match &config.knockout {
        Some(knockout_cfg) => (
            knockout::assess(&resolved, knockout_cfg),
            Some(knockout::documentation_check(
                &resolved,
                knockout_cfg,
                decimal_places,
            )),
        ),
        None => (
            KnockoutAssessment {
                outcomes: vec![KnockoutOutcome::NotApplicable; resolved.len()],
                ..KnockoutAssessment::default()
            },
            None,
        ),
    };

    let doc_penalty = documentation.map(|check| check.penalty).unwrap_or(0.0);
    let total_score = round_to((base.score - doc_penalty).max(0.0), decimal_places);

    let numeric = classify::classify(total_score, table);
    let (band, verdict) = knockout::derive_status(table, &numeric, &assessment);

    let mut reasons = assessment.reasons.clone();
    if let Some(check) = documentation.filter(|check| check.missing > 0) {
        reasons.push(format!(
            "{} of {} required document(s) missing, penalty {}",
            check.missing, check.required, check.penalty
        ));
    }

    let breakdown = resolved
        .iter()
        .zip(assessment.outcomes.iter())
        .map(|(entry, outcome)| BreakdownEntry {
            criterion: entry.criterion.id.clone(),
            raw_score: entry.raw_score,
            weight: entry.weight(),
            weighted_score: entry.weighted_score(),
            knockout: *outcome,
            documentation: knockout::document_status(entry),
        })
        .collect();

    ScoringResult {
        table: table_name.to_string(),
        base_score: base.score,
        doc_penalty,
        total_score,
        scaled_score: numeric.scaled_score,
        status: band.label.clone(),
        verdict,
        knockout_failed: assessment.failed,
        requires_manual_review: assessment.requires_review,
        confidence_score: documentation.map(|check| check.confidence),
        reasons,
        breakdown,
        skipped,
    }
}
