use super::aggregate::{round_to, ResolvedItem};
use super::classify::{conditional_band, rejection_band, Classification};
use crate::types::config::{Band, BandTable, KnockoutConfig};
use crate::types::scoring::{DocumentStatus, KnockoutOutcome, Verdict};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnockoutAssessment {
    pub outcomes: Vec<KnockoutOutcome>,
    pub failed: bool,
    pub requires_review: bool,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentationCheck {
    pub required: usize,
    pub missing: usize,
    pub penalty: f64,
    pub confidence: f64,
}

pub fn knockout_outcome(raw_score: f64, config: &KnockoutConfig) -> KnockoutOutcome {
    if raw_score < config.review_threshold {
        KnockoutOutcome::Fail
    } else if raw_score < config.knockout_threshold {
        KnockoutOutcome::Review
    } else {
        KnockoutOutcome::Pass
    }
}

pub fn assess(resolved: &[ResolvedItem<'_>], config: &KnockoutConfig) -> KnockoutAssessment {
    let mut assessment = KnockoutAssessment::default();

    for entry in resolved {
        if !entry.criterion.knockout {
            assessment.outcomes.push(KnockoutOutcome::NotApplicable);
            continue;
        }

        let outcome = knockout_outcome(entry.raw_score, config);
        debug!(criterion = %entry.criterion.id, score = entry.raw_score, ?outcome, "knockout check");
        match outcome {
            KnockoutOutcome::Fail => {
                assessment.failed = true;
                assessment.reasons.push(format!(
                    "knockout criterion {} scored {} (below {})",
                    entry.criterion.id, entry.raw_score, config.review_threshold
                ));
            }
            KnockoutOutcome::Review => {
                assessment.requires_review = true;
                assessment.reasons.push(format!(
                    "knockout criterion {} scored {} (review band {} to {})",
                    entry.criterion.id,
                    entry.raw_score,
                    config.review_threshold,
                    config.knockout_threshold
                ));
            }
            KnockoutOutcome::Pass | KnockoutOutcome::NotApplicable => {}
        }
        assessment.outcomes.push(outcome);
    }

    assessment
}

pub fn document_status(entry: &ResolvedItem<'_>) -> DocumentStatus {
    if !entry.criterion.requires_doc {
        DocumentStatus::NotRequired
    } else if entry.item.has_documentation.unwrap_or(false) {
        DocumentStatus::Present
    } else {
        DocumentStatus::Missing
    }
}

pub fn documentation_check(
    resolved: &[ResolvedItem<'_>],
    config: &KnockoutConfig,
    decimal_places: u32,
) -> DocumentationCheck {
    let (required, missing) =
        resolved
            .iter()
            .fold((0usize, 0usize), |(required, missing), entry| {
                match document_status(entry) {
                    DocumentStatus::NotRequired => (required, missing),
                    DocumentStatus::Present => (required + 1, missing),
                    DocumentStatus::Missing => (required + 1, missing + 1),
                }
            });

    let penalty = (missing as f64 * config.doc_penalty_per_missing).min(config.max_doc_penalty);
    let confidence = if required == 0 {
        100.0
    } else {
        round_to(
            (required - missing) as f64 / required as f64 * 100.0,
            decimal_places,
        )
    };

    DocumentationCheck {
        required,
        missing,
        penalty,
        confidence,
    }
}

// Failed knockout, then review or conditional score, then the numeric band.
pub fn derive_status<'t>(
    table: &'t BandTable,
    numeric: &Classification<'t>,
    assessment: &KnockoutAssessment,
) -> (&'t Band, Verdict) {
    if assessment.failed {
        return (rejection_band(table).1, Verdict::Rejected);
    }
    if assessment.requires_review || numeric.verdict == Verdict::Conditional {
        return (conditional_band(table).1, Verdict::Conditional);
    }
    (numeric.band, numeric.verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::aggregate::resolve;
    use crate::engine::classify::classify;
    use crate::types::criteria::{CriteriaSet, Criterion, EvaluationItem};

    fn config() -> KnockoutConfig {
        KnockoutConfig {
            review_threshold: 30.0,
            knockout_threshold: 40.0,
            doc_penalty_per_missing: 5.0,
            max_doc_penalty: 12.0,
        }
    }

    #[test]
    fn knockout_outcome_bands_are_half_open() {
        let cfg = config();
        assert_eq!(knockout_outcome(29.99, &cfg), KnockoutOutcome::Fail);
        assert_eq!(knockout_outcome(30.0, &cfg), KnockoutOutcome::Review);
        assert_eq!(knockout_outcome(39.99, &cfg), KnockoutOutcome::Review);
        assert_eq!(knockout_outcome(40.0, &cfg), KnockoutOutcome::Pass);
    }

    #[test]
    fn assess_flags_only_knockout_criteria() {
        let criteria = CriteriaSet::new(vec![
            Criterion::new("plain", 1.0),
            Criterion::new("ko", 1.0).knockout(),
        ]);
        let items = vec![
            EvaluationItem::scored("plain", 0.0),
            EvaluationItem::scored("ko", 35.0),
        ];
        let (resolved, _) = resolve(&items, &criteria, 100.0);

        let assessment = assess(&resolved, &config());
        assert_eq!(
            assessment.outcomes,
            vec![KnockoutOutcome::NotApplicable, KnockoutOutcome::Review]
        );
        assert!(!assessment.failed);
        assert!(assessment.requires_review);
        assert_eq!(assessment.reasons.len(), 1);
        assert!(assessment.reasons[0].contains("ko"));
    }

    #[test]
    fn documentation_penalty_is_capped() {
        let criteria = CriteriaSet::new(
            (0..5)
                .map(|idx| Criterion::new(&format!("d{idx}"), 1.0).requires_doc())
                .collect(),
        );
        let items = (0..5)
            .map(|idx| EvaluationItem::scored(&format!("d{idx}"), 90.0).with_documentation(false))
            .collect::<Vec<_>>();
        let (resolved, _) = resolve(&items, &criteria, 100.0);

        let check = documentation_check(&resolved, &config(), 2);
        assert_eq!(check.required, 5);
        assert_eq!(check.missing, 5);
        assert_eq!(check.penalty, 12.0);
        assert_eq!(check.confidence, 0.0);
    }

    #[test]
    fn undeclared_documentation_counts_as_missing() {
        let criteria = CriteriaSet::new(vec![
            Criterion::new("a", 1.0).requires_doc(),
            Criterion::new("b", 1.0).requires_doc(),
            Criterion::new("c", 1.0).requires_doc(),
            Criterion::new("free", 1.0),
        ]);
        let items = vec![
            EvaluationItem::scored("a", 80.0).with_documentation(true),
            EvaluationItem::scored("b", 80.0),
            EvaluationItem::scored("c", 80.0).with_documentation(true),
            EvaluationItem::scored("free", 80.0),
        ];
        let (resolved, _) = resolve(&items, &criteria, 100.0);

        let check = documentation_check(&resolved, &config(), 2);
        assert_eq!(check.required, 3);
        assert_eq!(check.missing, 1);
        assert_eq!(check.penalty, 5.0);
        assert_eq!(check.confidence, 66.67);
    }

    #[test]
    fn no_required_documents_means_full_confidence() {
        let criteria = CriteriaSet::new(vec![Criterion::new("a", 1.0)]);
        let items = vec![EvaluationItem::scored("a", 50.0)];
        let (resolved, _) = resolve(&items, &criteria, 100.0);
        let check = documentation_check(&resolved, &config(), 2);
        assert_eq!(check.penalty, 0.0);
        assert_eq!(check.confidence, 100.0);
    }

    #[test]
    fn derive_status_applies_rules_in_priority_order() {
        let table = BandTable::builtin("approval").expect("builtin");
        let high = classify(95.0, &table);
        let low = classify(20.0, &table);

        let failed = KnockoutAssessment {
            failed: true,
            requires_review: true,
            ..KnockoutAssessment::default()
        };
        assert_eq!(derive_status(&table, &high, &failed).0.label, "rejected");

        let review = KnockoutAssessment {
            requires_review: true,
            ..KnockoutAssessment::default()
        };
        assert_eq!(
            derive_status(&table, &high, &review),
            (&table.bands()[1], Verdict::Conditional)
        );
        assert_eq!(derive_status(&table, &low, &review).1, Verdict::Conditional);

        let clean = KnockoutAssessment::default();
        assert_eq!(derive_status(&table, &high, &clean).1, Verdict::Approved);
        assert_eq!(derive_status(&table, &low, &clean).1, Verdict::Rejected);
    }
}
