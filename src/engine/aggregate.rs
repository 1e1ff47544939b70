use crate::types::criteria::{CriteriaSet, Criterion, CriterionId, EvaluationItem};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct ResolvedItem<'a> {
    pub item: &'a EvaluationItem,
    pub criterion: &'a Criterion,
    pub raw_score: f64,
}

impl ResolvedItem<'_> {
    pub fn weight(&self) -> f64 {
        self.criterion.effective_weight()
    }

    pub fn weighted_score(&self) -> f64 {
        self.raw_score * self.weight()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub weighted_sum: f64,
    pub total_weight: f64,
    pub score: f64,
}

pub fn resolve<'a>(
    items: &'a [EvaluationItem],
    criteria: &'a CriteriaSet,
    max_score: f64,
) -> (Vec<ResolvedItem<'a>>, Vec<CriterionId>) {
    let lookup = criteria.lookup();
    let mut resolved = Vec::with_capacity(items.len());
    let mut skipped = Vec::new();

    for item in items {
        match lookup.get(&item.criterion) {
            Some(&criterion) => resolved.push(ResolvedItem {
                item,
                criterion,
                raw_score: item.answer.value(max_score),
            }),
            None => {
                debug!(criterion = %item.criterion, "skipping item with unresolved criterion");
                skipped.push(item.criterion.clone());
            }
        }
    }

    (resolved, skipped)
}

// No matched weight yields 0. Scores are not clamped.
pub fn weighted_average(resolved: &[ResolvedItem<'_>], decimal_places: u32) -> Aggregate {
    let (weighted_sum, total_weight) = resolved
        .iter()
        .fold((0.0, 0.0), |(sum, weight), entry| {
            (sum + entry.weighted_score(), weight + entry.weight())
        });

    let score = if total_weight > 0.0 {
        round_to(weighted_sum / total_weight, decimal_places)
    } else {
        0.0
    };

    Aggregate {
        weighted_sum,
        total_weight,
        score,
    }
}

pub fn round_to(value: f64, decimal_places: u32) -> f64 {
    let factor = 10f64.powi(decimal_places as i32);
    (value * factor).round() / factor
}
