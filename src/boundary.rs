use crate::error::SiteScoreError;
use crate::types::config::ScaleConfig;
use crate::types::criteria::{CriteriaSet, EvaluationSheet};
use std::collections::HashSet;

/// Rejects criteria snapshots the engine cannot score meaningfully.
pub fn validate_criteria(criteria: &CriteriaSet) -> Result<(), SiteScoreError> {
    if criteria.is_empty() {
        return Err(SiteScoreError::InvalidCriteria(
            "at least one criterion is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for criterion in &criteria.criteria {
        let id = criterion.id.as_str().trim();
        if id.is_empty() {
            return Err(SiteScoreError::InvalidCriteria(
                "criterion ids must be non-empty".to_string(),
            ));
        }
        if !seen.insert(id) {
            return Err(SiteScoreError::InvalidCriteria(format!(
                "duplicate criterion id: {id}"
            )));
        }
        if !criterion.weight.is_finite() {
            return Err(SiteScoreError::InvalidCriteria(format!(
                "criterion {id} has a non-finite weight"
            )));
        }
    }

    Ok(())
}

/// Every answer must sit within `[0, max_score]` and each criterion may be
/// answered once. One bad item fails the whole submission.
pub fn validate_sheet(sheet: &EvaluationSheet, scale: &ScaleConfig) -> Result<(), SiteScoreError> {
    let mut answered = HashSet::new();
    for item in &sheet.items {
        if !answered.insert(&item.criterion) {
            return Err(SiteScoreError::DuplicateAnswer(item.criterion.to_string()));
        }
        let value = item.answer.value(scale.max_score);
        if !value.is_finite() || !(0.0..=scale.max_score).contains(&value) {
            return Err(SiteScoreError::InvalidScore {
                criterion: item.criterion.to_string(),
                max: scale.max_score,
            });
        }
    }
    Ok(())
}

pub fn validate(
    sheet: &EvaluationSheet,
    criteria: &CriteriaSet,
    scale: &ScaleConfig,
) -> Result<(), SiteScoreError> {
    validate_criteria(criteria)?;
    validate_sheet(sheet, scale)
}
